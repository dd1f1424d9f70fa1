//! Parallel weighted-selection batches

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use wf_wheel::{SeededRandom, WeightedSelector, WheelConfig};

use crate::report::SimReport;

/// Spins per work unit. Each chunk owns a generator seeded by
/// [`chunk_seed`], so totals do not depend on the thread count.
pub const CHUNK_SPINS: u64 = 10_000;

/// Seed for one chunk: first word of ChaCha stream `chunk` under key `seed`
pub fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(chunk);
    rng.next_u64()
}

/// Run `spins` weighted selections over `config`'s segments
pub fn simulate(config: &WheelConfig, spins: u64, seed: u64) -> SimReport {
    let segments = config.clone().normalized().segment_set();
    let n = segments.len();

    if !segments.is_spinnable() {
        log::warn!("Simulation skipped: {} segment(s), need at least 2", n);
        return SimReport::from_counts(&segments, vec![0; n], seed);
    }

    let chunks = spins.div_ceil(CHUNK_SPINS);
    log::info!(
        "Simulating {} spins over {} segments ({} chunks, seed {})",
        spins,
        n,
        chunks,
        seed
    );

    let counts = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = SeededRandom::from_seed(chunk_seed(seed, chunk));
            let len = CHUNK_SPINS.min(spins - chunk * CHUNK_SPINS);
            let mut counts = vec![0u64; n];
            for _ in 0..len {
                if let Some(index) = WeightedSelector::pick(&segments, &mut rng) {
                    counts[index] += 1;
                }
            }
            counts
        })
        .reduce(
            || vec![0u64; n],
            |mut acc, part| {
                for (total, count) in acc.iter_mut().zip(part) {
                    *total += count;
                }
                acc
            },
        );

    SimReport::from_counts(&segments, counts, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_wheel::{Color, Segment};

    fn config(weights: &[f64]) -> WheelConfig {
        WheelConfig {
            segments: weights
                .iter()
                .enumerate()
                .map(|(i, &w)| Segment::new(format!("S{i}"), Color::WHITE, w))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_sum_to_spins() {
        let report = simulate(&config(&[1.0, 2.0, 3.0]), 25_001, 9);

        assert_eq!(report.spins, 25_001);
        assert_eq!(report.segments.iter().map(|s| s.count).sum::<u64>(), 25_001);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let cfg = config(&[1.0, 1.0, 5.0]);
        let a = simulate(&cfg, 40_000, 123);
        let b = simulate(&cfg, 40_000, 123);

        let counts_a: Vec<_> = a.segments.iter().map(|s| s.count).collect();
        let counts_b: Vec<_> = b.segments.iter().map(|s| s.count).collect();
        assert_eq!(counts_a, counts_b);
    }

    #[test]
    fn test_matches_weights() {
        let report = simulate(&config(&[1.0, 1.0, 1.0, 1.0]), 100_000, 1);

        assert!(report.max_deviation < 0.01, "deviation {}", report.max_deviation);
        for stats in &report.segments {
            assert_eq!(stats.expected, 0.25);
        }
    }

    #[test]
    fn test_zero_weights_are_uniform() {
        let report = simulate(&config(&[0.0, 0.0, 0.0]), 30_000, 4);

        for stats in &report.segments {
            assert!((stats.observed - 1.0 / 3.0).abs() < 0.015);
        }
    }

    #[test]
    fn test_adjacent_seeds_share_no_chunks() {
        let base: Vec<u64> = (0..10).map(|chunk| chunk_seed(5, chunk)).collect();
        let next: Vec<u64> = (0..10).map(|chunk| chunk_seed(6, chunk)).collect();

        for seed in &next {
            assert!(!base.contains(seed));
        }
        assert_eq!(chunk_seed(5, 3), chunk_seed(5, 3));
        assert_ne!(chunk_seed(5, 0), chunk_seed(5, 1));
    }

    #[test]
    fn test_not_spinnable() {
        let report = simulate(&config(&[1.0]), 1_000, 0);
        assert_eq!(report.spins, 0);
    }
}
