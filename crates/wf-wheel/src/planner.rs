//! Spin Planning
//!
//! Turns "land on segment i" into an immutable [`SpinPlan`]: the wheel always
//! moves forward, completes a whole number of extra turns, and stops with the
//! target segment's center under the pointer.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::random::RandomSource;
use crate::segment::{FULL_TURN, SegmentSet};

/// Shortest spin the controller will animate (seconds)
pub const MIN_SPIN_DURATION: f64 = 0.001;

/// Turn-count and duration ranges for random spins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinSettings {
    /// Minimum extra full turns (inclusive)
    pub min_full_turns: u32,
    /// Maximum extra full turns (inclusive)
    pub max_full_turns: u32,
    /// Shortest spin duration (seconds)
    pub duration_min: f64,
    /// Longest spin duration (seconds)
    pub duration_max: f64,
    /// Progress curve
    pub easing: Easing,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            min_full_turns: 4,
            max_full_turns: 8,
            duration_min: 2.8,
            duration_max: 4.5,
            easing: Easing::EaseInOut,
        }
    }
}

impl SpinSettings {
    /// Fixed turn count and duration (no randomness left in planning)
    pub fn fixed(turns: u32, duration: f64, easing: Easing) -> Self {
        Self {
            min_full_turns: turns,
            max_full_turns: turns,
            duration_min: duration,
            duration_max: duration,
            easing,
        }
    }
}

/// One planned spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    /// Orientation when the spin starts (degrees)
    pub start_angle: f64,
    /// Resting orientation (degrees, unbounded)
    pub end_angle: f64,
    /// Animation length (seconds, >= MIN_SPIN_DURATION)
    pub duration: f64,
    /// Progress curve
    pub easing: Easing,
    /// Segment the wheel lands on
    pub target_index: usize,
    /// Extra full turns before the final approach
    pub turns: u32,
}

impl SpinPlan {
    /// Total rotation covered by the plan
    pub fn total_rotation(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Normalized progress after `elapsed` seconds (0.0 - 1.0)
    #[inline]
    pub fn progress(&self, elapsed: f64) -> f64 {
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased orientation after `elapsed` seconds
    #[inline]
    pub fn angle_at(&self, elapsed: f64) -> f64 {
        let k = self.easing.evaluate(self.progress(elapsed));
        if k >= 1.0 {
            return self.end_angle;
        }

        let angle = self.start_angle + (self.end_angle - self.start_angle) * k;
        // Rounding must never carry the wheel past either end of the plan
        angle.clamp(
            self.start_angle.min(self.end_angle),
            self.start_angle.max(self.end_angle),
        )
    }
}

/// Minimal non-negative forward rotation from `current` to `target` (0 <= delta < 360)
#[inline]
pub fn forward_delta(current: f64, target: f64) -> f64 {
    let delta = (target - current).rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if delta >= FULL_TURN { 0.0 } else { delta }
}

/// Stateless spin planner
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinPlanner;

impl SpinPlanner {
    /// Plan a spin with a random turn count and duration
    ///
    /// Draws the turn count first, then the duration. Returns `None` when the
    /// set has fewer than two segments or `target_index` is out of range.
    pub fn plan(
        current_angle: f64,
        target_index: usize,
        segments: &SegmentSet,
        settings: &SpinSettings,
        rng: &mut dyn RandomSource,
    ) -> Option<SpinPlan> {
        segments.center_angle(target_index)?;

        let turns = rng.range_inclusive(settings.min_full_turns, settings.max_full_turns);
        let duration = rng.range_f64(settings.duration_min, settings.duration_max);

        Self::plan_exact(
            current_angle,
            target_index,
            segments,
            turns,
            duration,
            settings.easing,
        )
    }

    /// Plan a spin with an explicit turn count and duration
    pub fn plan_exact(
        current_angle: f64,
        target_index: usize,
        segments: &SegmentSet,
        turns: u32,
        duration: f64,
        easing: Easing,
    ) -> Option<SpinPlan> {
        let target = segments.center_angle(target_index)?;
        let start_angle = if current_angle.is_finite() {
            current_angle
        } else {
            0.0
        };

        let delta = forward_delta(start_angle, target);
        let end_angle = start_angle + turns as f64 * FULL_TURN + delta;

        Some(SpinPlan {
            start_angle,
            end_angle,
            duration: sanitize_duration(duration),
            easing,
            target_index,
            turns,
        })
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() {
        duration.max(MIN_SPIN_DURATION)
    } else {
        MIN_SPIN_DURATION
    }
}
