//! Simulation report

use std::fmt;

use serde::Serialize;

use wf_wheel::{SegmentSet, WeightedSelector};

/// Per-segment tally
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub index: usize,
    pub label: String,
    pub weight: f64,
    /// Times the segment was selected
    pub count: u64,
    /// Observed share (count / spins)
    pub observed: f64,
    /// Configured share
    pub expected: f64,
}

impl SegmentStats {
    /// Observed minus expected share
    pub fn deviation(&self) -> f64 {
        self.observed - self.expected
    }
}

/// Outcome distribution of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub spins: u64,
    pub segments: Vec<SegmentStats>,
    /// Largest |observed - expected| over all segments
    pub max_deviation: f64,
    /// Pearson χ² statistic against the configured weights
    pub chi_square: f64,
}

impl SimReport {
    /// Build a report from raw selection counts (one per segment)
    pub fn from_counts(segments: &SegmentSet, counts: Vec<u64>, seed: u64) -> Self {
        let spins: u64 = counts.iter().sum();
        let probabilities = WeightedSelector::probabilities(segments);

        let stats: Vec<SegmentStats> = segments
            .iter()
            .zip(counts)
            .zip(probabilities)
            .enumerate()
            .map(|(index, ((segment, count), expected))| SegmentStats {
                index,
                label: segment.label.clone(),
                weight: segment.effective_weight(),
                count,
                observed: if spins > 0 {
                    count as f64 / spins as f64
                } else {
                    0.0
                },
                expected,
            })
            .collect();

        let max_deviation = if spins > 0 {
            stats
                .iter()
                .map(|s| s.deviation().abs())
                .fold(0.0, f64::max)
        } else {
            0.0
        };

        let chi_square = if spins > 0 {
            stats
                .iter()
                .filter(|s| s.expected > 0.0)
                .map(|s| {
                    let expected = s.expected * spins as f64;
                    let diff = s.count as f64 - expected;
                    diff * diff / expected
                })
                .sum()
        } else {
            0.0
        };

        Self {
            seed,
            spins,
            segments: stats,
            max_deviation,
            chi_square,
        }
    }

    /// Degrees of freedom for the χ² statistic
    pub fn degrees_of_freedom(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.expected > 0.0)
            .count()
            .saturating_sub(1)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "spins: {}  seed: {}", self.spins, self.seed)?;
        writeln!(
            f,
            "{:>4}  {:<16} {:>8} {:>10} {:>9} {:>9}",
            "#", "label", "weight", "count", "observed", "expected"
        )?;
        for s in &self.segments {
            writeln!(
                f,
                "{:>4}  {:<16} {:>8.3} {:>10} {:>8.3}% {:>8.3}%",
                s.index,
                s.label,
                s.weight,
                s.count,
                s.observed * 100.0,
                s.expected * 100.0
            )?;
        }
        write!(
            f,
            "max deviation: {:.4}%  chi²: {:.3} (df {})",
            self.max_deviation * 100.0,
            self.chi_square,
            self.degrees_of_freedom()
        )
    }
}
