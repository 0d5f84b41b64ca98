use crate::components::server::Server;
use crate::engine::Simulation;
use crate::stats::{DerivedStats, Statistics};
use crate::theory::ErlangC;
use crate::traits::{CustomerId, ServerId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct ServerView {
    pub id: ServerId,
    pub busy: bool,
    pub customer: Option<CustomerId>,
    pub completion_time: Option<f64>,
}

impl From<&Server> for ServerView {
    fn from(server: &Server) -> Self {
        Self {
            id: server.id,
            busy: server.is_busy(),
            customer: server.customer().map(|c| c.id),
            completion_time: server.completion_time(),
        }
    }
}

/// Read-only view of the simulation for presentation layers.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Snapshot {
    pub clock: f64,
    pub next_arrival_time: f64,
    pub finished: bool,
    pub queue_length: usize,
    pub busy_servers: usize,
    pub servers: Vec<ServerView>,
    pub customers_arrived: u64,
    pub customers_served: u64,
    pub stats: Statistics,
    pub derived: DerivedStats,
    pub theory: ErlangC,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct MetricPoint {
    pub clock: f64,
    pub queue_length: usize,
    pub busy_servers: usize,
    pub avg_queue_length: Option<f64>,
    pub utilization: Option<f64>,
    pub avg_time_in_system: Option<f64>,
}

/// Samples the simulation at a fixed simulated-time interval for plotting hosts.
pub struct HistoryRecorder {
    pub history: VecDeque<MetricPoint>,
    pub max_points: usize,
    pub interval: f64,
    last_sample_time: Option<f64>,
}

impl HistoryRecorder {
    pub fn new(max_points: usize, interval: f64) -> Self {
        Self {
            history: VecDeque::with_capacity(max_points),
            max_points,
            interval,
            last_sample_time: None,
        }
    }

    /// Record a point if at least `interval` has passed since the previous one.
    pub fn update(&mut self, sim: &Simulation) -> bool {
        if let Some(last) = self.last_sample_time {
            if sim.clock() < last + self.interval {
                return false;
            }
        }

        let derived = sim.derived();
        self.history.push_back(MetricPoint {
            clock: sim.clock(),
            queue_length: sim.queue_length(),
            busy_servers: sim.busy_server_count(),
            avg_queue_length: derived.avg_queue_length,
            utilization: derived.utilization,
            avg_time_in_system: derived.avg_time_in_system,
        });

        if self.history.len() > self.max_points {
            self.history.pop_front();
        }

        self.last_sample_time = Some(sim.clock());
        true
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_sample_time = None;
    }
}
