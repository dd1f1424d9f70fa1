//! Wheel layout for the rendering layer
//!
//! Angles are degrees clockwise from the top of the wheel. Label positions
//! are in the wheel's local space with +y pointing up.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::segment::{FULL_TURN, SegmentSet};

/// Default distance from the hub to label anchors
pub const DEFAULT_LABEL_RADIUS: f64 = 140.0;

/// Geometry of one slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceLayout {
    pub index: usize,
    /// Clockwise angle where the slice begins
    pub start_angle: f64,
    /// Angular width
    pub sweep: f64,
    /// Fraction of a radial fill covered by this slice (1/n)
    pub fill_fraction: f64,
    /// Local rotation for a top-anchored clockwise radial fill
    pub rotation: f64,
    pub color: Color,
}

/// Placement of one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub index: usize,
    pub text: String,
    /// Anchor position (x, y)
    pub position: (f64, f64),
    /// Local rotation aligning the text with its radius
    pub rotation: f64,
}

/// Full wheel layout, derived from one revision of a [`SegmentSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelLayout {
    pub slice_angle: f64,
    pub label_radius: f64,
    pub slices: Vec<SliceLayout>,
    pub labels: Vec<LabelLayout>,
    /// Segment set revision this layout was built from
    pub revision: u64,
}

impl WheelLayout {
    /// Lay out slices and labels. `None` below two segments.
    pub fn build(segments: &SegmentSet, label_radius: f64) -> Option<Self> {
        let slice_angle = segments.slice_angle()?;
        let n = segments.len();

        let mut slices = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);

        for (i, segment) in segments.iter().enumerate() {
            slices.push(SliceLayout {
                index: i,
                start_angle: i as f64 * slice_angle,
                sweep: slice_angle,
                fill_fraction: 1.0 / n as f64,
                rotation: -(i as f64) * slice_angle,
                color: segment.color,
            });

            let center = i as f64 * slice_angle + slice_angle * 0.5;
            labels.push(LabelLayout {
                index: i,
                text: segment.label.clone(),
                position: polar_to_local(center, label_radius),
                rotation: -center,
            });
        }

        Some(Self {
            slice_angle,
            label_radius,
            slices,
            labels,
            revision: segments.revision(),
        })
    }

    /// Still matches the given segment set
    pub fn is_current(&self, segments: &SegmentSet) -> bool {
        self.revision == segments.revision()
    }
}

/// Point at `radius` along the clockwise-from-top angle
#[inline]
pub fn polar_to_local(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (rad.sin() * radius, rad.cos() * radius)
}

/// Local label rotation that cancels the wheel's absolute orientation
///
/// Applied to every label each frame, it keeps the text upright on screen
/// no matter how far the wheel has turned.
#[inline]
pub fn upright_label_rotation(wheel_orientation: f64) -> f64 {
    let r = -wheel_orientation.rem_euclid(FULL_TURN);
    if r == 0.0 { 0.0 } else { r }
}
