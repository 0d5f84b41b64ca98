use rand::prelude::*;
use rand_distr::Exp;

use crate::traits::VariateSource;

/// Single shared random stream backed by `StdRng`.
pub struct Variates {
    rng: StdRng,
}

impl Variates {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Default for Variates {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl VariateSource for Variates {
    fn exponential(&mut self, mean: f64) -> f64 {
        match Exp::new(1.0 / mean) {
            Ok(dist) => dist.sample(&mut self.rng),
            // Only reachable for a non-positive mean, which config validation rejects.
            Err(_) => 0.0,
        }
    }

    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Timestamp `delay` after `clock`, guaranteed to lie strictly after it.
///
/// Falls back to the next representable value above `clock` when the delay is zero
/// or too small to survive the addition. `clock` is never negative.
pub fn after(clock: f64, delay: f64) -> f64 {
    let t = clock + delay;
    if t > clock {
        t
    } else {
        f64::from_bits(clock.to_bits() + 1)
    }
}
