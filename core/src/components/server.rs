use serde::{Deserialize, Serialize};

use crate::components::customer::Customer;
use crate::traits::ServerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerState {
    Idle,
    Busy {
        customer: Customer,
        completion_time: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: ServerId,
    state: ServerState,
}

impl Server {
    pub fn new(id: ServerId) -> Self {
        Self {
            id,
            state: ServerState::Idle,
        }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ServerState::Busy { .. })
    }

    pub fn completion_time(&self) -> Option<f64> {
        match &self.state {
            ServerState::Busy { completion_time, .. } => Some(*completion_time),
            ServerState::Idle => None,
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        match &self.state {
            ServerState::Busy { customer, .. } => Some(customer),
            ServerState::Idle => None,
        }
    }

    /// Take ownership of `customer` until `completion_time`. The server must be idle.
    pub(crate) fn begin(&mut self, customer: Customer, completion_time: f64) {
        debug_assert!(!self.is_busy(), "server {} is already busy", self.id);
        self.state = ServerState::Busy {
            customer,
            completion_time,
        };
    }

    /// Release the customer in service, returning the server to idle.
    pub(crate) fn finish(&mut self) -> Option<Customer> {
        match std::mem::replace(&mut self.state, ServerState::Idle) {
            ServerState::Busy { customer, .. } => Some(customer),
            ServerState::Idle => None,
        }
    }
}
