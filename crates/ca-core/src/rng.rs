//! The engine-owned deterministic random source.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from `ModelConfig::seed`, and
//! threads it by `&mut` through every stochastic call.  Draws happen in a
//! fixed order:
//!
//!   profile sampling (construction)
//!   → per step: activation shuffle
//!   → per agent: adoption trial → ownership-drop trial → booking trials
//!
//! Nothing in the simulation core touches thread-local or OS randomness, so
//! two runs with the same seed and configuration are bit-for-bit identical.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Not `Clone`.  Independent runs (e.g. a parameter sweep) each build their
/// own.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// A uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// One Bernoulli trial: `true` with probability `p`.
    ///
    /// Always consumes exactly one uniform draw, including at `p <= 0` and
    /// `p >= 1`, so the draw sequence never depends on parameter values.
    /// (`Rng::gen_bool` skips the draw at `p == 1`.)
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
