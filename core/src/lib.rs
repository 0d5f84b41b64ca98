pub mod analytics;
pub mod components;
pub mod config;
pub mod engine;
pub mod random;
pub mod stats;
pub mod theory;
pub mod traits;

pub use analytics::{HistoryRecorder, MetricPoint, ServerView, Snapshot};
pub use components::customer::Customer;
pub use components::server::{Server, ServerState};
pub use components::EntityPool;
pub use config::{ConfigError, SimConfig, MAX_SERVERS, MIN_SERVERS};
pub use engine::{Event, EventKind, Simulation};
pub use random::Variates;
pub use stats::{DerivedStats, Statistics};
pub use theory::{ErlangC, Expectation, TheoreticalModel};
pub use traits::{CustomerId, ServerId, VariateSource};
