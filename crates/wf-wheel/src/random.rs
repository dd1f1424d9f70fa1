//! Injected random sources
//!
//! Selection and planning never touch ambient randomness. Everything draws
//! from a [`RandomSource`], so a seed (or a scripted sequence) reproduces a
//! spin exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest f64 strictly below 1.0
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Uniform sample provider
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[min, max]` (bounds may be given in either order)
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi - lo) as u64 + 1;
        let offset = ((self.next_unit() * span as f64) as u64).min(span - 1);
        lo + offset as u32
    }

    /// Uniform real in `[min, max]` (bounds may be given in either order)
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        lo + self.next_unit() * (hi - lo)
    }
}

/// Clamp a raw sample into `[0, 1)`. NaN maps to 0.
#[inline]
pub fn clamp_unit(u: f64) -> f64 {
    if u.is_nan() || u < 0.0 {
        0.0
    } else if u >= 1.0 {
        BELOW_ONE
    } else {
        u
    }
}

/// Seedable ChaCha8 generator
///
/// ChaCha8 output is stable across platforms and releases, unlike `StdRng`,
/// so a recorded seed replays the same spins everywhere.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Deterministic generator from a seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed cycle of samples
///
/// Used for deterministic tests and forced outcomes. Samples outside
/// `[0, 1)` are clamped into range.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    samples: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into().into_iter().map(clamp_unit).collect(),
            position: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Cycles through `i / count` for `i` in `0..count`
    pub fn uniform_grid(count: usize) -> Self {
        let count = count.max(1);
        Self::new(
            (0..count)
                .map(|i| i as f64 / count as f64)
                .collect::<Vec<_>>(),
        )
    }

    /// Samples consumed so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.position % self.samples.len()];
        self.position += 1;
        value
    }
}
