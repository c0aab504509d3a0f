//! Injectable randomness for combat draws.
//!
//! Every probability draw in the engines (crit rolls, damage variance,
//! turn-order jitter, boss targeting) goes through [`RandomSource`], so
//! tests can swap in a seeded or fixed generator without touching engine
//! logic.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// A uniform random source over real intervals.
pub trait RandomSource {
    /// Draw a value uniformly from `[lo, hi)`. Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// Adapter that turns any `rand::Rng` into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Unseeded source backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source for simulations and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// ChaCha source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

/// Source that always lands at the same relative position in the requested
/// range: `lo * (1 - fraction) + hi * fraction`.
///
/// `FixedSource::midpoint()` yields 1.0 for variance draws, 1.0 for turn-order
/// jitter and 0.5 for crit rolls, which makes fights fully deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    fraction: f64,
}

impl FixedSource {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn midpoint() -> Self {
        Self::new(0.5)
    }
}

impl RandomSource for FixedSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo * (1.0 - self.fraction) + hi * self.fraction
    }
}

/// Source that replays a scripted list of raw values, clamped into each
/// requested range. Falls back to the range midpoint once exhausted.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: VecDeque<f64>,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        match self.values.pop_front() {
            Some(v) => v.clamp(lo, hi),
            None => lo + (hi - lo) / 2.0,
        }
    }
}
