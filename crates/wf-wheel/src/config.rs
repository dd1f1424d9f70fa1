//! Wheel configuration
//!
//! Plain structured input from the embedding application, loadable from
//! JSON or YAML. Every field has a default, so a partial document works.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{WheelError, WheelResult};
use crate::layout::DEFAULT_LABEL_RADIUS;
use crate::planner::{MIN_SPIN_DURATION, SpinSettings};
use crate::segment::{Segment, SegmentSet, sanitize_weight};

/// Complete wheel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Segments in clockwise order from the top
    pub segments: Vec<Segment>,
    /// Distance from the hub to label anchors
    pub label_radius: f64,
    /// Counter-rotate labels so text stays upright while spinning
    pub keep_labels_upright: bool,
    /// Minimum extra full turns per spin
    pub min_full_turns: u32,
    /// Maximum extra full turns per spin
    pub max_full_turns: u32,
    /// Shortest spin (seconds)
    pub spin_duration_min: f64,
    /// Longest spin (seconds)
    pub spin_duration_max: f64,
    /// Progress curve
    pub easing: Easing,
}

impl Default for WheelConfig {
    fn default() -> Self {
        let spin = SpinSettings::default();
        Self {
            segments: SegmentSet::stock().as_slice().to_vec(),
            label_radius: DEFAULT_LABEL_RADIUS,
            keep_labels_upright: true,
            min_full_turns: spin.min_full_turns,
            max_full_turns: spin.max_full_turns,
            spin_duration_min: spin.duration_min,
            spin_duration_max: spin.duration_max,
            easing: spin.easing,
        }
    }
}

impl WheelConfig {
    /// Parse JSON
    pub fn from_json(json: &str) -> WheelResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WheelError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML
    pub fn from_yaml(yaml: &str) -> WheelResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| WheelError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> WheelResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> WheelResult<Self> = match extension.as_str() {
            "json" => Self::from_json,
            "yaml" | "yml" => Self::from_yaml,
            _ => return Err(WheelError::UnsupportedFormat(path.display().to_string())),
        };

        let config = parse(&std::fs::read_to_string(path)?)?;

        log::info!(
            "Loaded wheel config from {:?}: {} segments",
            path,
            config.segments.len()
        );
        Ok(config)
    }

    /// Reject values no normalization can repair
    pub fn validate(&self) -> WheelResult<()> {
        let reals = [
            ("label_radius", self.label_radius),
            ("spin_duration_min", self.spin_duration_min),
            ("spin_duration_max", self.spin_duration_max),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(WheelError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if let Some(segment) = self.segments.iter().find(|s| !s.weight.is_finite()) {
            return Err(WheelError::InvalidConfig(format!(
                "segment {:?} has non-finite weight {}",
                segment.label, segment.weight
            )));
        }

        Ok(())
    }

    /// Clamp and reorder values into their valid ranges, logging each fix
    pub fn normalized(mut self) -> Self {
        for segment in &mut self.segments {
            let weight = sanitize_weight(segment.weight);
            if weight != segment.weight {
                log::warn!(
                    "Wheel config: segment {:?} weight {} clamped to {}",
                    segment.label,
                    segment.weight,
                    weight
                );
                segment.weight = weight;
            }
        }

        if !self.label_radius.is_finite() || self.label_radius < 0.0 {
            log::warn!("Wheel config: label_radius {} clamped to 0", self.label_radius);
            self.label_radius = 0.0;
        }

        if self.min_full_turns > self.max_full_turns {
            log::warn!(
                "Wheel config: turn range {}..={} reversed, swapping",
                self.min_full_turns,
                self.max_full_turns
            );
            std::mem::swap(&mut self.min_full_turns, &mut self.max_full_turns);
        }

        self.spin_duration_min = floor_duration("spin_duration_min", self.spin_duration_min);
        self.spin_duration_max = floor_duration("spin_duration_max", self.spin_duration_max);
        if self.spin_duration_min > self.spin_duration_max {
            log::warn!(
                "Wheel config: duration range {}..={} reversed, swapping",
                self.spin_duration_min,
                self.spin_duration_max
            );
            std::mem::swap(&mut self.spin_duration_min, &mut self.spin_duration_max);
        }

        self
    }

    /// Segment set described by this config
    pub fn segment_set(&self) -> SegmentSet {
        SegmentSet::from_segments(self.segments.iter().cloned())
    }

    /// Spin settings described by this config
    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            min_full_turns: self.min_full_turns,
            max_full_turns: self.max_full_turns,
            duration_min: self.spin_duration_min,
            duration_max: self.spin_duration_max,
            easing: self.easing,
        }
    }
}

fn floor_duration(name: &str, value: f64) -> f64 {
    if value.is_finite() && value >= MIN_SPIN_DURATION {
        return value;
    }
    log::warn!(
        "Wheel config: {} {} raised to {}",
        name,
        value,
        MIN_SPIN_DURATION
    );
    MIN_SPIN_DURATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_default_is_stock_wheel() {
        let config = WheelConfig::default();

        assert_eq!(config.segments.len(), 8);
        assert_eq!(config.label_radius, 140.0);
        assert!(config.keep_labels_upright);
        assert_eq!((config.min_full_turns, config.max_full_turns), (4, 8));
        assert_eq!(config.spin_duration_min, 2.8);
        assert_eq!(config.spin_duration_max, 4.5);
        assert_eq!(config.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "segments": [
                { "label": "Gold", "color": { "r": 1.0, "g": 0.8, "b": 0.0 }, "weight": 0.5 },
                { "label": "Silver", "weight": 2 },
                { "label": "Nothing" }
            ],
            "min_full_turns": 2,
            "max_full_turns": 3,
            "easing": "ease_out_quart"
        }"#;

        let config = WheelConfig::from_json(json).unwrap();

        assert_eq!(config.segments.len(), 3);
        assert_eq!(config.segments[0].color, Color::rgb(1.0, 0.8, 0.0));
        assert_eq!(config.segments[1].weight, 2.0);
        assert_eq!(config.segments[1].color, Color::WHITE);
        assert_eq!(config.segments[2].weight, 1.0);
        assert_eq!(config.max_full_turns, 3);
        assert_eq!(config.easing, Easing::EaseOutQuart);
        // Untouched fields keep their defaults
        assert_eq!(config.spin_duration_max, 4.5);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
segments:
  - label: Red
    color: { r: 1.0, g: 0.0, b: 0.0 }
  - label: Blue
    color: { r: 0.0, g: 0.0, b: 1.0, a: 0.5 }
    weight: 3
keep_labels_upright: false
spin_duration_min: 1.0
spin_duration_max: 2.0
"#;

        let config = WheelConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[1].color.a, 0.5);
        assert_eq!(config.segments[1].weight, 3.0);
        assert!(!config.keep_labels_upright);
        assert_eq!(config.spin_settings().duration_max, 2.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            WheelConfig::from_json("{ not json"),
            Err(WheelError::Json(_))
        ));
        assert!(matches!(
            WheelConfig::from_yaml("segments: [unterminated"),
            Err(WheelError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = WheelConfig::load("wheel.toml").unwrap_err();
        assert!(matches!(err, WheelError::UnsupportedFormat(_)));

        let err = WheelConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, WheelError::Io(_)));
    }

    #[test]
    fn test_normalized() {
        let config = WheelConfig {
            segments: vec![Segment {
                label: "neg".into(),
                color: Color::WHITE,
                weight: -2.0,
            }],
            label_radius: -5.0,
            min_full_turns: 9,
            max_full_turns: 3,
            spin_duration_min: 5.0,
            spin_duration_max: 0.0,
            ..Default::default()
        }
        .normalized();

        assert_eq!(config.segments[0].weight, 0.0);
        assert_eq!(config.label_radius, 0.0);
        assert_eq!((config.min_full_turns, config.max_full_turns), (3, 9));
        assert_eq!(config.spin_duration_min, MIN_SPIN_DURATION);
        assert_eq!(config.spin_duration_max, 5.0);
    }

    #[test]
    fn test_segment_set_sanitizes_weights() {
        let config = WheelConfig {
            segments: vec![
                Segment {
                    label: "a".into(),
                    color: Color::WHITE,
                    weight: -1.0,
                },
                Segment::new("b", Color::WHITE, 1.0),
            ],
            ..Default::default()
        };

        let set = config.segment_set();
        assert_eq!(set.get(0).unwrap().weight, 0.0);
        assert_eq!(set.total_weight(), 1.0);
    }
}
