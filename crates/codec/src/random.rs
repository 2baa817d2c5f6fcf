//! Injected random source for weighted block selection
//!
//! The parser performs exactly one draw per probabilistic body line, in
//! line order, so reproducibility follows from feeding the same seed
//! and the same input.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform random source.
pub trait RandomSource {
    /// Draws a uniform double in `[0, 1)`.
    fn next_double(&mut self) -> f64;
}

/// Seedable random source backed by [`StdRng`].
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for SeededRandom {
    fn next_double(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}
