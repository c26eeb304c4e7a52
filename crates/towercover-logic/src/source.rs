//! Injected randomness.
//!
//! The engine only ever asks for "a uniform integer in `[low, high]`".
//! Any `rand::Rng` satisfies that, so tests pass a seeded `StdRng` and get
//! reproducible runs.

use rand::Rng;

/// Source of uniformly distributed integers.
pub trait UniformSource {
    /// Sample uniformly from `low..=high`.
    ///
    /// # Panics
    /// Implementations may panic if `low > high`.
    fn sample_inclusive(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn sample_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..=high)
    }
}
