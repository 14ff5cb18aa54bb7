//! Randomized scalar generators

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Source of randomized scalars used by factories
pub trait RandomSource {
    /// Uniform value in `[min, max)`; returns `min` for an empty range
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Uniform angle in `[0, 2π)`
    fn angle_uniform(&mut self) -> f32 {
        self.uniform(0.0, TAU)
    }
}

/// `rand`-backed random source
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Random source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic random source for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }
}
