//! Spin Easing Curves
//!
//! Every curve maps `[0, 1] → [0, 1]`, is monotonic non-decreasing and
//! satisfies `ease(0) = 0`, `ease(1) = 1`.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Easing curve applied to normalized spin progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant angular velocity
    Linear,
    /// Cubic Hermite with flat tangents at both ends (slow start, slow stop)
    #[default]
    EaseInOut,
    /// Quadratic deceleration
    EaseOutQuad,
    /// Cubic deceleration
    EaseOutCubic,
    /// Quartic deceleration (long coast into the result)
    EaseOutQuart,
    /// Quarter-sine deceleration
    EaseOutSine,
    /// Cubic acceleration then deceleration
    EaseInOutCubic,
}

impl Easing {
    pub const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::EaseInOut,
        Easing::EaseOutQuad,
        Easing::EaseOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutSine,
        Easing::EaseInOutCubic,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::EaseInOut => "EaseInOut",
            Easing::EaseOutQuad => "EaseOutQuad",
            Easing::EaseOutCubic => "EaseOutCubic",
            Easing::EaseOutQuart => "EaseOutQuart",
            Easing::EaseOutSine => "EaseOutSine",
            Easing::EaseInOutCubic => "EaseInOutCubic",
        }
    }

    /// Evaluate curve at position t (clamped to 0.0 - 1.0)
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,

            // y = 3t² - 2t³
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),

            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),

            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),

            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),

            Easing::EaseOutSine => (t * FRAC_PI_2).sin(),

            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_boundaries() {
        for curve in Easing::ALL {
            assert!(curve.evaluate(0.0).abs() < 1e-12, "{:?} at 0.0", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-12, "{:?} at 1.0", curve);

            let mid = curve.evaluate(0.5);
            assert!(mid > 0.0 && mid < 1.0, "{:?} at 0.5 = {}", curve, mid);
        }
    }

    #[test]
    fn test_curve_monotonic() {
        for curve in Easing::ALL {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let t = i as f64 / 1000.0;
                let val = curve.evaluate(t);
                assert!(val >= prev - 1e-12, "{:?}: {} < {} at t={}", curve, val, prev, t);
                prev = val;
            }
        }
    }

    #[test]
    fn test_input_clamped() {
        for curve in Easing::ALL {
            assert_eq!(curve.evaluate(-2.0), curve.evaluate(0.0));
            assert_eq!(curve.evaluate(3.0), curve.evaluate(1.0));
            assert_eq!(curve.evaluate(f64::NAN), curve.evaluate(0.0));
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = Easing::EaseInOut;
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-12);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let mirrored = 1.0 - curve.evaluate(1.0 - t);
            assert!((curve.evaluate(t) - mirrored).abs() < 1e-12);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::EaseOutQuart).unwrap();
        assert_eq!(json, "\"ease_out_quart\"");

        let parsed: Easing = serde_json::from_str("\"ease_in_out\"").unwrap();
        assert_eq!(parsed, Easing::EaseInOut);
    }
}
