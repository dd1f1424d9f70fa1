//! Segments and the ordered segment set
//!
//! Order is significant: segment `i` covers `[i * slice, (i + 1) * slice)`
//! degrees, measured clockwise from the top of the wheel.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Full circle in degrees
pub const FULL_TURN: f64 = 360.0;

/// Minimum segment count for layout and spinning
pub const MIN_SPIN_SEGMENTS: usize = 2;

/// One weighted slice of the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Display text
    #[serde(default = "default_label")]
    pub label: String,
    /// Slice colour
    #[serde(default)]
    pub color: Color,
    /// Selection weight (0 = never picked while any other weight is positive)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_label() -> String {
    "Item".to_string()
}

fn default_weight() -> f64 {
    1.0
}

/// Clamp a raw weight to the non-negative range. NaN and infinities become 0.
#[inline]
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

impl Segment {
    /// Create a segment, clamping the weight to >= 0
    pub fn new(label: impl Into<String>, color: Color, weight: f64) -> Self {
        Self {
            label: label.into(),
            color,
            weight: sanitize_weight(weight),
        }
    }

    /// Weight as seen by selection
    #[inline]
    pub fn effective_weight(&self) -> f64 {
        sanitize_weight(self.weight)
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(default_label(), Color::WHITE, default_weight())
    }
}

/// Case-insensitive exact label comparison
fn labels_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Ordered collection of weighted segments
///
/// Every mutation bumps [`SegmentSet::revision`], so downstream layouts and
/// plans can tell they were derived from an older set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
    revision: u64,
}

impl SegmentSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing segments (weights are sanitized)
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments
                .into_iter()
                .map(|s| Segment::new(s.label, s.color, s.weight))
                .collect(),
            revision: 0,
        }
    }

    /// Equal-weight segments with white slices, one per label
    pub fn from_labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self::from_segments(
            labels
                .into_iter()
                .map(|label| Segment::new(label, Color::WHITE, 1.0)),
        )
    }

    /// Stock eight-segment wheel, labels "1".."8"
    pub fn stock() -> Self {
        const COLORS: [Color; 8] = [
            Color::rgb(0.95, 0.35, 0.35),
            Color::rgb(0.35, 0.65, 0.95),
            Color::rgb(0.45, 0.90, 0.55),
            Color::rgb(0.95, 0.85, 0.35),
            Color::rgb(0.75, 0.45, 0.95),
            Color::rgb(0.35, 0.90, 0.85),
            Color::rgb(0.95, 0.55, 0.75),
            Color::rgb(0.65, 0.65, 0.65),
        ];

        Self::from_segments(
            COLORS
                .iter()
                .enumerate()
                .map(|(i, &color)| Segment::new((i + 1).to_string(), color, 1.0)),
        )
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append a segment. Negative weights are clamped to 0.
    pub fn add_segment(&mut self, label: impl Into<String>, color: Color, weight: f64) {
        self.segments.push(Segment::new(label, color, weight));
        self.touch();
    }

    /// Remove the segment at `index`. Out of range is a silent no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Segment> {
        if index >= self.segments.len() {
            return None;
        }
        let removed = self.segments.remove(index);
        self.touch();
        Some(removed)
    }

    /// Remove the first segment whose label matches, ignoring case
    pub fn remove_by_label(&mut self, label: &str) -> bool {
        match self.position_of(label) {
            Some(index) => {
                self.segments.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove every segment
    pub fn clear(&mut self) {
        self.segments.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Mutation counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Enough segments to lay out and spin
    pub fn is_spinnable(&self) -> bool {
        self.segments.len() >= MIN_SPIN_SEGMENTS
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the first segment whose label matches, ignoring case
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.segments
            .iter()
            .position(|s| labels_match(&s.label, label))
    }

    /// Sum of effective weights
    pub fn total_weight(&self) -> f64 {
        self.segments.iter().map(Segment::effective_weight).sum()
    }

    /// Angular width of one slice in degrees (`None` below two segments)
    pub fn slice_angle(&self) -> Option<f64> {
        if !self.is_spinnable() {
            return None;
        }
        Some(FULL_TURN / self.segments.len() as f64)
    }

    /// Clockwise angle from the top to the middle of segment `index`
    pub fn center_angle(&self, index: usize) -> Option<f64> {
        let slice = self.slice_angle()?;
        if index >= self.segments.len() {
            return None;
        }
        Some(index as f64 * slice + slice * 0.5)
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
