//! Customer and server records plus the FIFO waiting line.

use std::collections::VecDeque;

use crate::traits::{CustomerId, ServerId};

pub mod customer;
pub mod server;

use customer::Customer;
use server::Server;

/// Owns every live customer: each one sits either in `queue` or inside exactly one busy server.
#[derive(Debug, Clone)]
pub struct EntityPool {
    servers: Vec<Server>,
    queue: VecDeque<Customer>,
    busy: usize,
    next_customer_id: CustomerId,
}

impl EntityPool {
    pub fn new(server_count: usize) -> Self {
        Self {
            servers: (0..server_count).map(Server::new).collect(),
            queue: VecDeque::new(),
            busy: 0,
            next_customer_id: 0,
        }
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id)
    }

    pub fn waiting(&self) -> impl Iterator<Item = &Customer> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn busy_count(&self) -> usize {
        self.busy
    }

    pub fn customers_in_system(&self) -> usize {
        self.queue.len() + self.busy
    }

    /// Ids of idle servers in ascending order.
    pub fn idle_servers(&self) -> Vec<ServerId> {
        self.servers.iter().filter(|s| !s.is_busy()).map(|s| s.id).collect()
    }

    /// Busy server finishing first; the lowest id wins an exact tie.
    pub fn earliest_completion(&self) -> Option<(f64, ServerId)> {
        self.servers
            .iter()
            .filter_map(|s| s.completion_time().map(|t| (t, s.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
    }

    /// Append a new customer to the tail of the queue.
    pub(crate) fn enqueue(&mut self, clock: f64) -> CustomerId {
        let id = self.next_customer_id;
        self.next_customer_id += 1;
        self.queue.push_back(Customer::new(id, clock));
        id
    }

    pub(crate) fn has_waiting_and_idle(&self) -> bool {
        !self.queue.is_empty() && self.busy < self.servers.len()
    }

    /// Move the queue head onto `server`, stamping its service start.
    pub(crate) fn start_service(
        &mut self,
        server: ServerId,
        clock: f64,
        completion_time: f64,
    ) -> Option<&Customer> {
        let slot = self.servers.get_mut(server)?;
        if slot.is_busy() {
            return None;
        }
        let mut customer = self.queue.pop_front()?;
        customer.service_start_time = Some(clock);
        slot.begin(customer, completion_time);
        self.busy += 1;
        slot.customer()
    }

    /// Free `server` and hand back the customer leaving the system.
    pub(crate) fn finish_service(&mut self, server: ServerId) -> Option<Customer> {
        let customer = self.servers.get_mut(server)?.finish()?;
        self.busy -= 1;
        Some(customer)
    }
}
