use serde::{Deserialize, Serialize};

pub const MIN_SERVERS: usize = 1;
pub const MAX_SERVERS: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("server_count must be in [1, 10], got {0}")]
    ServerCount(usize),

    /// Note the parameter is a mean gap between arrivals, not a rate.
    #[error("mean_interarrival_time must be finite and > 0, got {0}")]
    MeanInterarrivalTime(f64),

    #[error("mean_service_time must be finite and > 0, got {0}")]
    MeanServiceTime(f64),

    #[error("max_run_time must be finite and > 0, got {0}")]
    MaxRunTime(f64),

    #[error("stats_reset_time must be finite and >= 0, got {0}")]
    StatsResetTime(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub server_count: usize,
    pub mean_interarrival_time: f64,
    pub mean_service_time: f64,
    pub max_run_time: f64,
    pub stats_reset_time: f64,
    /// `None` seeds the variate stream from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            server_count: 5,
            mean_interarrival_time: 1.0,
            mean_service_time: 4.0,
            max_run_time: 10_000.0,
            stats_reset_time: 100.0,
            seed: None,
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

pub(crate) fn check_mean_interarrival_time(v: f64) -> Result<(), ConfigError> {
    if positive(v) {
        Ok(())
    } else {
        Err(ConfigError::MeanInterarrivalTime(v))
    }
}

pub(crate) fn check_mean_service_time(v: f64) -> Result<(), ConfigError> {
    if positive(v) {
        Ok(())
    } else {
        Err(ConfigError::MeanServiceTime(v))
    }
}

impl SimConfig {
    pub fn new(server_count: usize, mean_interarrival_time: f64, mean_service_time: f64) -> Self {
        Self {
            server_count,
            mean_interarrival_time,
            mean_service_time,
            ..Default::default()
        }
    }

    pub fn with_run_time(mut self, max_run_time: f64) -> Self {
        self.max_run_time = max_run_time;
        self
    }

    pub fn with_reset_time(mut self, stats_reset_time: f64) -> Self {
        self.stats_reset_time = stats_reset_time;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SERVERS..=MAX_SERVERS).contains(&self.server_count) {
            return Err(ConfigError::ServerCount(self.server_count));
        }
        check_mean_interarrival_time(self.mean_interarrival_time)?;
        check_mean_service_time(self.mean_service_time)?;
        if !positive(self.max_run_time) {
            return Err(ConfigError::MaxRunTime(self.max_run_time));
        }
        if !(self.stats_reset_time.is_finite() && self.stats_reset_time >= 0.0) {
            return Err(ConfigError::StatsResetTime(self.stats_reset_time));
        }
        Ok(())
    }
}
