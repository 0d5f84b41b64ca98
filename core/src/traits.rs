pub type ServerId = usize;
pub type CustomerId = u64;

/// Source of the random draws consumed by the arrival process and service dispatch.
///
/// Every draw the simulation makes goes through this trait, so a fixed
/// implementation (or a scripted one in tests) fully determines the event sequence.
pub trait VariateSource {
    /// Exponential deviate with the given mean. Callers only pass strictly positive means.
    fn exponential(&mut self, mean: f64) -> f64;

    /// Uniform index in `0..len`. Callers only pass `len >= 1`.
    fn choose(&mut self, len: usize) -> usize;

    /// Restart the stream from `seed`. Scripted sources may ignore this.
    fn reseed(&mut self, _seed: u64) {}
}
