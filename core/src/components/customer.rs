use serde::{Deserialize, Serialize};

use crate::traits::CustomerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Clock value when the customer joined the waiting queue.
    pub arrival_time: f64,
    /// Clock value when service began; `None` while waiting.
    pub service_start_time: Option<f64>,
}

impl Customer {
    pub fn new(id: CustomerId, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            service_start_time: None,
        }
    }

    pub fn time_in_queue(&self) -> Option<f64> {
        self.service_start_time.map(|s| s - self.arrival_time)
    }
}
