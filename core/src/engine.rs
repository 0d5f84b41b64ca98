use std::cmp::Ordering;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::analytics::{ServerView, Snapshot};
use crate::components::server::Server;
use crate::components::EntityPool;
use crate::config::{check_mean_interarrival_time, check_mean_service_time, ConfigError, SimConfig};
use crate::random::{after, Variates};
use crate::stats::{DerivedStats, Statistics};
use crate::theory::{ErlangC, TheoreticalModel};
use crate::traits::{ServerId, VariateSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// One-shot statistics reset at `stats_reset_time`.
    Reset,
    Complete(ServerId),
    Arrive,
    /// Terminal bound at `max_run_time`; mutates nothing.
    End,
}

impl EventKind {
    /// Tie-break rank at equal timestamps, lowest dispatches first.
    fn rank(self) -> u8 {
        match self {
            EventKind::Reset => 0,
            EventKind::Complete(_) => 1,
            EventKind::Arrive => 2,
            EventKind::End => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
}

impl Event {
    fn new(time: f64, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Event {}
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then(self.kind.rank().cmp(&other.kind.rank()))
            .then_with(|| match (self.kind, other.kind) {
                (EventKind::Complete(a), EventKind::Complete(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            })
    }
}

/// The whole simulation state: clock, entities, statistics and the theoretical baseline.
///
/// Advanced one event at a time by [`Simulation::step`]; state is consistent between
/// any two calls, so a host may stop and resume at will.
pub struct Simulation {
    config: SimConfig,
    clock: f64,
    next_arrival_time: f64,
    pool: EntityPool,
    stats: Statistics,
    theory: TheoreticalModel,
    variates: Box<dyn VariateSource>,
    customers_arrived: u64,
    customers_served: u64,
    events_dispatched: u64,
}

impl Simulation {
    /// Validate `config` and build a simulation drawing from a `StdRng` stream.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let variates = Variates::new(config.seed);
        Ok(Self::build(config, Box::new(variates)))
    }

    /// Like [`Simulation::new`], drawing every variate from `variates` instead.
    pub fn with_variates(
        config: SimConfig,
        variates: Box<dyn VariateSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, variates))
    }

    fn build(config: SimConfig, variates: Box<dyn VariateSource>) -> Self {
        let theory = TheoreticalModel::new(
            config.mean_interarrival_time,
            config.mean_service_time,
            config.server_count,
        );
        let mut sim = Self {
            pool: EntityPool::new(config.server_count),
            config,
            clock: 0.0,
            next_arrival_time: 0.0,
            stats: Statistics::new(0.0),
            theory,
            variates,
            customers_arrived: 0,
            customers_served: 0,
            events_dispatched: 0,
        };
        let first_gap = sim.variates.exponential(sim.config.mean_interarrival_time);
        sim.next_arrival_time = after(0.0, first_gap);
        info!(
            "setup: {} servers, mean interarrival {}, mean service {}, run until {}",
            sim.config.server_count,
            sim.config.mean_interarrival_time,
            sim.config.mean_service_time,
            sim.config.max_run_time
        );
        sim
    }

    /// Discard all state and start over from `config`, keeping the variate source.
    ///
    /// An invalid config is rejected before anything changes. A configured seed
    /// restarts the variate stream.
    pub fn setup(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(seed) = config.seed {
            self.variates.reseed(seed);
        }
        // The seeded stand-in is dropped once `build` takes the real source back.
        let stand_in: Box<dyn VariateSource> = Box::new(Variates::seeded(0));
        let variates = std::mem::replace(&mut self.variates, stand_in);
        *self = Self::build(config, variates);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.clock >= self.config.max_run_time
    }

    /// Earliest pending event, or `None` once the clock has reached `max_run_time`.
    pub fn next_event(&self) -> Option<Event> {
        if self.is_finished() {
            return None;
        }
        let mut candidates = vec![
            Event::new(self.next_arrival_time, EventKind::Arrive),
            Event::new(self.config.max_run_time, EventKind::End),
        ];
        if let Some((time, id)) = self.pool.earliest_completion() {
            candidates.push(Event::new(time, EventKind::Complete(id)));
        }
        if self.config.stats_reset_time > self.clock {
            candidates.push(Event::new(self.config.stats_reset_time, EventKind::Reset));
        }
        candidates.into_iter().min()
    }

    /// Process exactly one event and return it; `None` when the run is over.
    pub fn step(&mut self) -> Option<Event> {
        let event = self.next_event()?;
        self.advance_to(event.time);
        trace!("t={:.6} {:?}", event.time, event.kind);

        match event.kind {
            EventKind::Arrive => self.arrive(),
            EventKind::Complete(server) => self.complete_service(server),
            EventKind::Reset => {
                info!("scheduled statistics reset at t={}", self.clock);
                self.stats.reset(self.clock);
            }
            EventKind::End => info!(
                "run finished at t={} after {} events ({} served)",
                self.clock,
                self.events_dispatched + 1,
                self.customers_served
            ),
        }
        self.events_dispatched += 1;
        Some(event)
    }

    /// Step until the run ends; returns how many events were processed.
    pub fn run(&mut self) -> u64 {
        let mut count = 0;
        while self.step().is_some() {
            count += 1;
        }
        count
    }

    /// Step while the next event falls at or before `time`.
    pub fn run_until(&mut self, time: f64) -> u64 {
        let mut count = 0;
        while self.next_event().is_some_and(|e| e.time <= time) {
            self.step();
            count += 1;
        }
        count
    }

    /// Zero every aggregate and restart the statistics window at the current clock.
    pub fn reset_stats(&mut self) {
        info!("manual statistics reset at t={}", self.clock);
        self.stats.reset(self.clock);
    }

    /// Takes effect from the next sampled gap; the pending arrival keeps its time.
    pub fn set_mean_interarrival_time(&mut self, mean: f64) -> Result<(), ConfigError> {
        check_mean_interarrival_time(mean)?;
        debug!(
            "mean interarrival time {} -> {}",
            self.config.mean_interarrival_time, mean
        );
        self.config.mean_interarrival_time = mean;
        self.refresh_theory();
        Ok(())
    }

    /// Takes effect from the next service start; customers in service keep their completion time.
    pub fn set_mean_service_time(&mut self, mean: f64) -> Result<(), ConfigError> {
        check_mean_service_time(mean)?;
        debug!("mean service time {} -> {}", self.config.mean_service_time, mean);
        self.config.mean_service_time = mean;
        self.refresh_theory();
        Ok(())
    }

    fn refresh_theory(&mut self) {
        let recomputed = self.theory.update(
            self.config.mean_interarrival_time,
            self.config.mean_service_time,
            self.config.server_count,
        );
        if recomputed {
            debug!("erlang-c baseline recomputed: rho={}", self.theory.result().rho);
        }
    }

    /// Integrate the pre-event state over the jump, then move the clock.
    fn advance_to(&mut self, time: f64) {
        let elapsed = time - self.clock;
        self.stats
            .integrate(elapsed, self.pool.queue_len(), self.pool.busy_count());
        self.clock = time;
    }

    fn arrive(&mut self) {
        self.pool.enqueue(self.clock);
        self.customers_arrived += 1;
        let gap = self.variates.exponential(self.config.mean_interarrival_time);
        self.next_arrival_time = after(self.clock, gap);
        self.begin_service();
    }

    fn begin_service(&mut self) {
        if !self.pool.has_waiting_and_idle() {
            return;
        }
        let idle = self.pool.idle_servers();
        let server = match idle.len() {
            1 => idle[0],
            n => idle[self.variates.choose(n).min(n - 1)],
        };
        let clock = self.clock;
        let service = self.variates.exponential(self.config.mean_service_time);
        let completion = after(clock, service);
        if let Some(customer) = self.pool.start_service(server, clock, completion) {
            let waited = clock - customer.arrival_time;
            self.stats.record_service_start(waited);
        }
    }

    fn complete_service(&mut self, server: ServerId) {
        if let Some(customer) = self.pool.finish_service(server) {
            self.stats.record_departure(self.clock - customer.arrival_time);
            self.customers_served += 1;
        }
        self.begin_service();
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn next_arrival_time(&self) -> f64 {
        self.next_arrival_time
    }

    pub fn queue_length(&self) -> usize {
        self.pool.queue_len()
    }

    pub fn busy_server_count(&self) -> usize {
        self.pool.busy_count()
    }

    pub fn customers_in_system(&self) -> usize {
        self.pool.customers_in_system()
    }

    pub fn servers(&self) -> &[Server] {
        self.pool.servers()
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn derived(&self) -> DerivedStats {
        self.stats.derived(self.clock, self.config.server_count)
    }

    pub fn theory(&self) -> &ErlangC {
        self.theory.result()
    }

    /// Lifetime count, untouched by statistics resets.
    pub fn customers_arrived(&self) -> u64 {
        self.customers_arrived
    }

    /// Lifetime count, untouched by statistics resets.
    pub fn customers_served(&self) -> u64 {
        self.customers_served
    }

    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock: self.clock,
            next_arrival_time: self.next_arrival_time,
            finished: self.is_finished(),
            queue_length: self.pool.queue_len(),
            busy_servers: self.pool.busy_count(),
            servers: self.pool.servers().iter().map(ServerView::from).collect(),
            customers_arrived: self.customers_arrived,
            customers_served: self.customers_served,
            stats: self.stats.clone(),
            derived: self.derived(),
            theory: *self.theory.result(),
        }
    }
}
