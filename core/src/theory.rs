//! Closed-form M/M/n baseline (Erlang-C).

use serde::{Deserialize, Serialize};

/// A steady-state expectation, or `Unbounded` when the queue grows without limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Expectation {
    Finite(f64),
    Unbounded,
}

impl Expectation {
    pub fn value(self) -> Option<f64> {
        match self {
            Expectation::Finite(v) => Some(v),
            Expectation::Unbounded => None,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Expectation::Unbounded)
    }

    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Expectation::Finite(v) => Expectation::Finite(f(v)),
            Expectation::Unbounded => Expectation::Unbounded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErlangC {
    /// Offered load in erlangs.
    pub offered_load: f64,
    /// Per-server load; the queue is stable only below 1.
    pub rho: f64,
    /// Probability that an arriving customer finds every server busy.
    pub wait_probability: Expectation,
    pub expected_utilization: f64,
    pub expected_queue_length: Expectation,
    pub expected_queue_wait: Expectation,
    pub expected_time_in_system: Expectation,
    pub expected_customers_in_system: Expectation,
}

impl ErlangC {
    /// Evaluate the model for the given mean inter-arrival gap, mean service time and server count.
    pub fn compute(
        mean_interarrival_time: f64,
        mean_service_time: f64,
        server_count: usize,
    ) -> Self {
        let n = server_count.max(1);
        let offered_load = mean_service_time / mean_interarrival_time;
        let rho = offered_load / n as f64;

        if rho.is_nan() || rho >= 1.0 {
            return Self {
                offered_load,
                rho,
                wait_probability: Expectation::Finite(1.0),
                expected_utilization: 1.0,
                expected_queue_length: Expectation::Unbounded,
                expected_queue_wait: Expectation::Unbounded,
                expected_time_in_system: Expectation::Unbounded,
                expected_customers_in_system: Expectation::Unbounded,
            };
        }

        // Terms are accumulated incrementally; the fixtures depend on this rounding order.
        let mut power_product = 1.0;
        let mut factorial_product = 1.0;
        let mut k_sum = 1.0;
        for j in 1..n {
            power_product *= offered_load;
            factorial_product *= j as f64;
            k_sum += power_product / factorial_product;
        }
        power_product *= offered_load;
        factorial_product *= n as f64;
        let last_term = power_product / factorial_product;

        let k = k_sum / (k_sum + last_term);
        let p_wait = (1.0 - k) / (1.0 - rho * k);

        let queue_length = Expectation::Finite(p_wait * rho / (1.0 - rho));
        let queue_wait =
            Expectation::Finite(p_wait * mean_service_time / (n as f64 * (1.0 - rho)));

        Self {
            offered_load,
            rho,
            wait_probability: Expectation::Finite(p_wait),
            expected_utilization: rho,
            expected_queue_length: queue_length,
            expected_queue_wait: queue_wait,
            expected_time_in_system: queue_wait.map(|w| w + mean_service_time),
            expected_customers_in_system: queue_length.map(|l| l + offered_load),
        }
    }

    pub fn is_stable(&self) -> bool {
        self.rho < 1.0
    }
}

/// Caches the last Erlang-C evaluation and recomputes only when an input changes.
#[derive(Debug, Clone)]
pub struct TheoreticalModel {
    inputs: (f64, f64, usize),
    result: ErlangC,
}

impl TheoreticalModel {
    pub fn new(mean_interarrival_time: f64, mean_service_time: f64, server_count: usize) -> Self {
        Self {
            inputs: (mean_interarrival_time, mean_service_time, server_count),
            result: ErlangC::compute(mean_interarrival_time, mean_service_time, server_count),
        }
    }

    /// Refresh the cache; returns whether a recomputation happened.
    pub fn update(
        &mut self,
        mean_interarrival_time: f64,
        mean_service_time: f64,
        server_count: usize,
    ) -> bool {
        let inputs = (mean_interarrival_time, mean_service_time, server_count);
        if inputs == self.inputs {
            return false;
        }
        self.inputs = inputs;
        self.result = ErlangC::compute(mean_interarrival_time, mean_service_time, server_count);
        true
    }

    pub fn result(&self) -> &ErlangC {
        &self.result
    }
}
