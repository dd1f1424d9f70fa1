//! Weighted Segment Selection
//!
//! Cumulative-weight walk over the segment set:
//! - **Weighted**: `r = u * total`, first segment whose running sum reaches `r`
//! - **Uniform fallback**: all weights zero → `floor(u * n)`
//!
//! Zero-weight segments are stepped over during the walk, so they can only
//! win through the uniform fallback. When the plain sum of weights overflows,
//! every weight is divided by the largest one before walking.

use crate::random::{RandomSource, clamp_unit};
use crate::segment::{Segment, SegmentSet};

/// Stateless weighted selector
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSelector;

impl WeightedSelector {
    /// Map a uniform sample `u ∈ [0, 1)` to a segment index
    ///
    /// Returns `None` only for an empty set.
    pub fn select(segments: &SegmentSet, u: f64) -> Option<usize> {
        select_index(segments.as_slice(), u)
    }

    /// Draw one sample from `rng` and select
    pub fn pick(segments: &SegmentSet, rng: &mut dyn RandomSource) -> Option<usize> {
        if segments.is_empty() {
            return None;
        }
        Self::select(segments, rng.next_unit())
    }

    /// Selection probability per segment
    pub fn probabilities(segments: &SegmentSet) -> Vec<f64> {
        let n = segments.len();
        if n == 0 {
            return Vec::new();
        }

        let scale = weight_scale(segments.as_slice());
        let total: f64 = segments.iter().map(|s| s.effective_weight() / scale).sum();
        if total <= 0.0 {
            return vec![1.0 / n as f64; n];
        }

        segments
            .iter()
            .map(|s| s.effective_weight() / scale / total)
            .collect()
    }
}

/// Slice-level selection used by [`WeightedSelector`]
pub fn select_index(segments: &[Segment], u: f64) -> Option<usize> {
    let n = segments.len();
    if n == 0 {
        return None;
    }

    let u = clamp_unit(u);
    let scale = weight_scale(segments);
    let total: f64 = segments.iter().map(|s| s.effective_weight() / scale).sum();

    if total <= 0.0 {
        return Some(((u * n as f64) as usize).min(n - 1));
    }

    let r = u * total;
    let mut acc = 0.0;
    let mut last_positive = n - 1;

    for (i, segment) in segments.iter().enumerate() {
        let weight = segment.effective_weight() / scale;
        if weight <= 0.0 {
            continue;
        }
        acc += weight;
        last_positive = i;
        if r <= acc {
            return Some(i);
        }
    }

    // Rounding left r just above the final running sum
    Some(last_positive)
}

/// Divisor keeping the weight sum finite (1.0 unless the plain sum overflows)
fn weight_scale(segments: &[Segment]) -> f64 {
    let total: f64 = segments.iter().map(Segment::effective_weight).sum();
    if total.is_finite() {
        return 1.0;
    }
    segments
        .iter()
        .map(Segment::effective_weight)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::random::SequenceRandom;

    fn weighted(weights: &[f64]) -> SegmentSet {
        SegmentSet::from_segments(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| Segment::new(format!("S{i}"), Color::WHITE, w)),
        )
    }

    fn histogram(set: &SegmentSet, samples: usize) -> Vec<usize> {
        let mut rng = SequenceRandom::uniform_grid(samples);
        let mut counts = vec![0; set.len()];
        for _ in 0..samples {
            counts[WeightedSelector::pick(set, &mut rng).unwrap()] += 1;
        }
        counts
    }

    #[test]
    fn test_equal_weights_are_fair() {
        let set = weighted(&[1.0, 1.0, 1.0, 1.0]);
        let samples = 40_000;

        for count in histogram(&set, samples) {
            let freq = count as f64 / samples as f64;
            assert!((freq - 0.25).abs() < 0.01, "frequency {freq}");
        }
    }

    #[test]
    fn test_proportional_to_weight() {
        let set = weighted(&[1.0, 3.0]);
        let counts = histogram(&set, 10_000);

        let freq_b = counts[1] as f64 / 10_000.0;
        assert!((freq_b - 0.75).abs() < 0.01);
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_uniform() {
        let set = weighted(&[0.0, 0.0, 0.0]);
        let counts = histogram(&set, 3_000);

        assert_eq!(counts, vec![1_000, 1_000, 1_000]);
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let set = weighted(&[0.0, 2.0, 0.0, 1.0, 0.0]);

        assert_eq!(WeightedSelector::select(&set, 0.0), Some(1));
        let counts = histogram(&set, 3_000);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        assert_eq!(counts[4], 0);
        assert_eq!(counts[1] + counts[3], 3_000);
    }

    #[test]
    fn test_walk_boundaries() {
        let set = weighted(&[1.0, 1.0]);

        assert_eq!(WeightedSelector::select(&set, 0.0), Some(0));
        assert_eq!(WeightedSelector::select(&set, 0.5), Some(0));
        assert_eq!(WeightedSelector::select(&set, 0.500_001), Some(1));
        assert_eq!(WeightedSelector::select(&set, 0.999_999), Some(1));
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let set = weighted(&[1.0, 1.0, 1.0]);

        assert_eq!(WeightedSelector::select(&set, -0.5), Some(0));
        assert_eq!(WeightedSelector::select(&set, 7.0), Some(2));
        assert_eq!(WeightedSelector::select(&set, f64::NAN), Some(0));
    }

    #[test]
    fn test_top_of_range_lands_on_last_positive() {
        let segments = [
            Segment::new("a", Color::WHITE, 0.1),
            Segment::new("b", Color::WHITE, 0.2),
            Segment::new("c", Color::WHITE, 0.0),
        ];

        let picked = select_index(&segments, 1.0 - f64::EPSILON).unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn test_empty_set() {
        let set = SegmentSet::new();
        let mut rng = SequenceRandom::constant(0.3);

        assert_eq!(WeightedSelector::select(&set, 0.3), None);
        assert_eq!(WeightedSelector::pick(&set, &mut rng), None);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_probabilities() {
        let probs = WeightedSelector::probabilities(&weighted(&[1.0, 3.0, 0.0]));
        assert_eq!(probs, vec![0.25, 0.75, 0.0]);

        let uniform = WeightedSelector::probabilities(&weighted(&[0.0, 0.0]));
        assert_eq!(uniform, vec![0.5, 0.5]);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let set = weighted(&[f64::MAX, f64::MAX]);

        assert_eq!(histogram(&set, 1_000), vec![501, 499]);
        assert_eq!(WeightedSelector::probabilities(&set), vec![0.5, 0.5]);

        let mixed = WeightedSelector::probabilities(&weighted(&[f64::MAX, f64::MAX, 0.0]));
        assert!(mixed[0] > 0.0 && mixed[1] > 0.0);
        assert_eq!(mixed[2], 0.0);
    }
}
