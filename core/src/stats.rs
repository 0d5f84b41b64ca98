use serde::{Deserialize, Serialize};

/// Running sums behind the observed performance measures.
///
/// Time integrals cover `[stats_start_time, clock]`; per-customer sums count the
/// customers whose service started (queue) or completed (system) inside that window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub stats_start_time: f64,
    /// Area under the queue-length curve.
    pub total_customer_queue_time: f64,
    /// Area under the busy-server-count curve.
    pub total_customer_service_time: f64,
    pub total_time_in_queue: f64,
    pub total_queue_throughput: u64,
    pub total_time_in_system: f64,
    pub total_system_throughput: u64,
}

impl Statistics {
    pub fn new(start: f64) -> Self {
        Self {
            stats_start_time: start,
            ..Default::default()
        }
    }

    /// Accumulate `elapsed` time spent in the state described by the pre-event counts.
    pub fn integrate(&mut self, elapsed: f64, queue_len: usize, busy: usize) {
        self.total_customer_queue_time += elapsed * queue_len as f64;
        self.total_customer_service_time += elapsed * busy as f64;
    }

    pub fn record_service_start(&mut self, time_in_queue: f64) {
        self.total_time_in_queue += time_in_queue;
        self.total_queue_throughput += 1;
    }

    pub fn record_departure(&mut self, time_in_system: f64) {
        self.total_time_in_system += time_in_system;
        self.total_system_throughput += 1;
    }

    /// Zero every aggregate and open a new window at `clock`.
    pub fn reset(&mut self, clock: f64) {
        *self = Self::new(clock);
    }

    fn window(&self, clock: f64) -> Option<f64> {
        let span = clock - self.stats_start_time;
        (span > 0.0).then_some(span)
    }

    pub fn avg_queue_length(&self, clock: f64) -> Option<f64> {
        self.window(clock).map(|w| self.total_customer_queue_time / w)
    }

    pub fn utilization(&self, clock: f64, server_count: usize) -> Option<f64> {
        if server_count == 0 {
            return None;
        }
        self.window(clock)
            .map(|w| self.total_customer_service_time / w / server_count as f64)
    }

    pub fn avg_customers_in_system(&self, clock: f64) -> Option<f64> {
        self.window(clock)
            .map(|w| (self.total_customer_queue_time + self.total_customer_service_time) / w)
    }

    pub fn avg_time_in_queue(&self) -> Option<f64> {
        (self.total_queue_throughput > 0)
            .then(|| self.total_time_in_queue / self.total_queue_throughput as f64)
    }

    pub fn avg_time_in_system(&self) -> Option<f64> {
        (self.total_system_throughput > 0)
            .then(|| self.total_time_in_system / self.total_system_throughput as f64)
    }

    pub fn derived(&self, clock: f64, server_count: usize) -> DerivedStats {
        DerivedStats {
            avg_queue_length: self.avg_queue_length(clock),
            utilization: self.utilization(clock, server_count),
            avg_customers_in_system: self.avg_customers_in_system(clock),
            avg_time_in_queue: self.avg_time_in_queue(),
            avg_time_in_system: self.avg_time_in_system(),
        }
    }
}

/// Ratios computed on demand; `None` means the denominator is still zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub avg_queue_length: Option<f64>,
    pub utilization: Option<f64>,
    pub avg_customers_in_system: Option<f64>,
    pub avg_time_in_queue: Option<f64>,
    pub avg_time_in_system: Option<f64>,
}
