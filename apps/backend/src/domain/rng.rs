//! Injectable randomness for shuffling and dice.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Uniform integer in `0..=upper`.
    fn up_to(&mut self, upper: usize) -> usize;
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Seeded for reproducible runs, OS entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn up_to(&mut self, upper: usize) -> usize {
        self.0.random_range(0..=upper)
    }
}

/// Replays a fixed list of picks, clamped to the requested range.
///
/// Once the script runs out every pick is `0`. Handy for pinning an exact
/// shuffle order or roll in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedSource {
    fn up_to(&mut self, upper: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(upper)
    }
}
