//! Spin Controller — frame-driven wheel state machine
//!
//! ```text
//!            spin() / spin_to_index()
//!   ┌──────┐ ───────────────────────▶ ┌──────────┐
//!   │ Idle │                          │ Spinning │ ◀── tick(dt)
//!   └──────┘ ◀─────────────────────── └──────────┘
//!        completion (snap to end, notify once)
//!        cancel()   (stay put, no notification)
//! ```
//!
//! The host calls [`SpinController::tick`] once per frame with the elapsed
//! time. Requests made while spinning are dropped, never queued.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::WheelConfig;
use crate::layout::{WheelLayout, upright_label_rotation};
use crate::planner::{SpinPlan, SpinPlanner, SpinSettings};
use crate::random::{RandomSource, SeededRandom};
use crate::segment::{Segment, SegmentSet};
use crate::selector::WeightedSelector;

/// State machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// Winning segment of a completed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub index: usize,
    pub label: String,
}

/// Answer to a spin request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinStart {
    /// Spin accepted; the wheel follows this plan
    Started(SpinPlan),
    /// A spin is already running; request dropped
    AlreadySpinning,
    /// Fewer than two segments; nothing to spin
    NotEnoughSegments,
}

impl SpinStart {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinStart::Started(_))
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        match self {
            SpinStart::Started(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Wheel orientation after this frame (degrees)
    pub orientation: f64,
    /// Phase after this frame
    pub phase: SpinPhase,
    /// Set on the frame that completes a spin, and only then
    pub finished: Option<SpinOutcome>,
}

impl TickResult {
    fn at_rest(orientation: f64) -> Self {
        Self {
            orientation,
            phase: SpinPhase::Idle,
            finished: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }
}

/// Rendering layer driven by the controller
pub trait WheelRenderer {
    /// Redraw slices and labels for a new layout
    fn rebuild(&mut self, layout: &WheelLayout);

    /// Remove everything drawn (fewer than two segments)
    fn clear(&mut self) {}

    /// Rotate the wheel. `label_rotation` is the local rotation keeping
    /// labels upright, present only when that option is on.
    fn set_orientation(&mut self, angle: f64, label_rotation: Option<f64>);
}

/// Completion callback
pub type SpinFinishedCallback = Box<dyn FnMut(&SpinOutcome)>;

#[derive(Debug, Clone)]
struct ActiveSpin {
    plan: SpinPlan,
    elapsed: f64,
    label: String,
}

/// Wheel of fortune: segments, selection, planning and animation
pub struct SpinController {
    segments: SegmentSet,
    settings: SpinSettings,
    label_radius: f64,
    keep_labels_upright: bool,
    rng: Box<dyn RandomSource>,
    /// Present only while spinning
    active: Option<ActiveSpin>,
    /// Orientation while idle
    rest_angle: f64,
    layout: Option<WheelLayout>,
    renderer: Option<Box<dyn WheelRenderer>>,
    on_finished: Option<SpinFinishedCallback>,
    spins_completed: u64,
    last_outcome: Option<SpinOutcome>,
}

impl SpinController {
    /// Create a controller over `segments`
    pub fn new(
        segments: SegmentSet,
        settings: SpinSettings,
        rng: impl RandomSource + 'static,
    ) -> Self {
        let mut controller = Self {
            segments,
            settings,
            label_radius: crate::layout::DEFAULT_LABEL_RADIUS,
            keep_labels_upright: true,
            rng: Box::new(rng),
            active: None,
            rest_angle: 0.0,
            layout: None,
            renderer: None,
            on_finished: None,
            spins_completed: 0,
            last_outcome: None,
        };
        controller.rebuild();
        controller
    }

    /// Create from a (normalized) configuration
    pub fn from_config(config: &WheelConfig, rng: impl RandomSource + 'static) -> Self {
        let config = config.clone().normalized();
        let mut controller = Self::new(config.segment_set(), config.spin_settings(), rng);
        controller.label_radius = config.label_radius;
        controller.keep_labels_upright = config.keep_labels_upright;
        controller.rebuild();
        controller
    }

    /// Create with a seeded ChaCha generator
    pub fn with_seed(segments: SegmentSet, settings: SpinSettings, seed: u64) -> Self {
        Self::new(segments, settings, SeededRandom::from_seed(seed))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // COLLABORATORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Attach a renderer and push the current layout and orientation to it
    pub fn set_renderer(&mut self, renderer: Box<dyn WheelRenderer>) {
        self.renderer = Some(renderer);
        self.rebuild();
    }

    /// Detach the renderer
    pub fn take_renderer(&mut self) -> Option<Box<dyn WheelRenderer>> {
        self.renderer.take()
    }

    /// Register the completion callback (replaces any previous one)
    pub fn on_spin_finished(&mut self, callback: impl FnMut(&SpinOutcome) + 'static) {
        self.on_finished = Some(Box::new(callback));
    }

    /// Swap the random source
    pub fn set_random_source(&mut self, rng: impl RandomSource + 'static) {
        self.rng = Box::new(rng);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    /// Replace turn/duration/easing settings. A running plan is unaffected.
    pub fn set_settings(&mut self, settings: SpinSettings) {
        self.settings = settings;
    }

    pub fn label_radius(&self) -> f64 {
        self.label_radius
    }

    pub fn set_label_radius(&mut self, radius: f64) {
        self.label_radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        self.rebuild();
    }

    pub fn keep_labels_upright(&self) -> bool {
        self.keep_labels_upright
    }

    pub fn set_keep_labels_upright(&mut self, upright: bool) {
        self.keep_labels_upright = upright;
    }

    /// Move the idle wheel to `angle` (ignored while spinning)
    pub fn set_orientation(&mut self, angle: f64) -> bool {
        if self.is_spinning() || !angle.is_finite() {
            return false;
        }
        self.rest_angle = angle;
        self.emit_orientation(angle);
        true
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SEGMENTS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    /// Append a segment. Rejected while spinning.
    pub fn add_segment(&mut self, label: impl Into<String>, color: Color, weight: f64) -> bool {
        if self.reject_mutation("add_segment") {
            return false;
        }
        self.segments.add_segment(label, color, weight);
        self.rebuild();
        true
    }

    /// Remove the segment at `index`. `None` when out of range or spinning.
    pub fn remove_segment_at(&mut self, index: usize) -> Option<Segment> {
        if self.reject_mutation("remove_segment_at") {
            return None;
        }
        let removed = self.segments.remove_at(index)?;
        self.rebuild();
        Some(removed)
    }

    /// Remove the first segment with a matching label (case-insensitive)
    pub fn remove_segment_by_label(&mut self, label: &str) -> bool {
        if self.reject_mutation("remove_segment_by_label") {
            return false;
        }
        if !self.segments.remove_by_label(label) {
            return false;
        }
        self.rebuild();
        true
    }

    /// Remove all segments. Rejected while spinning.
    pub fn clear_segments(&mut self) -> bool {
        if self.reject_mutation("clear_segments") {
            return false;
        }
        self.segments.clear();
        self.rebuild();
        true
    }

    /// Replace the whole segment set. Rejected while spinning.
    pub fn set_segments(&mut self, segments: SegmentSet) -> bool {
        if self.reject_mutation("set_segments") {
            return false;
        }
        self.segments = segments;
        self.rebuild();
        true
    }

    fn reject_mutation(&self, op: &str) -> bool {
        if self.is_spinning() {
            log::debug!("Wheel: {} rejected while spinning", op);
            return true;
        }
        false
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LAYOUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Recompute the layout from the current segments and push it to the renderer
    pub fn rebuild(&mut self) {
        self.layout = WheelLayout::build(&self.segments, self.label_radius);

        if let Some(renderer) = self.renderer.as_mut() {
            match &self.layout {
                Some(layout) => renderer.rebuild(layout),
                None => renderer.clear(),
            }
        }

        if self.layout.is_some() {
            self.emit_orientation(self.orientation());
        }
    }

    /// Layout for the current segments (`None` below two segments)
    pub fn layout(&self) -> Option<&WheelLayout> {
        self.layout.as_ref()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> SpinPhase {
        if self.active.is_some() {
            SpinPhase::Spinning
        } else {
            SpinPhase::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Current wheel orientation (degrees, unbounded)
    pub fn orientation(&self) -> f64 {
        match &self.active {
            Some(active) => active.plan.angle_at(active.elapsed),
            None => self.rest_angle,
        }
    }

    /// Plan of the running spin
    pub fn active_plan(&self) -> Option<&SpinPlan> {
        self.active.as_ref().map(|a| &a.plan)
    }

    /// Seconds into the running spin
    pub fn elapsed(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.elapsed)
    }

    pub fn spins_completed(&self) -> u64 {
        self.spins_completed
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Pick a winner by weight and start spinning towards it
    pub fn spin(&mut self) -> SpinStart {
        if let Some(rejected) = self.check_can_start() {
            return rejected;
        }
        match WeightedSelector::pick(&self.segments, self.rng.as_mut()) {
            Some(index) => self.start(index),
            None => SpinStart::NotEnoughSegments,
        }
    }

    /// Spin to a fixed segment. Out-of-range indices are clamped to the last segment.
    pub fn spin_to_index(&mut self, index: usize) -> SpinStart {
        if let Some(rejected) = self.check_can_start() {
            return rejected;
        }
        let clamped = index.min(self.segments.len() - 1);
        if clamped != index {
            log::debug!("Wheel: target index {} clamped to {}", index, clamped);
        }
        self.start(clamped)
    }

    fn check_can_start(&self) -> Option<SpinStart> {
        if self.is_spinning() {
            log::debug!("Wheel: spin request dropped, already spinning");
            return Some(SpinStart::AlreadySpinning);
        }
        if !self.segments.is_spinnable() {
            log::debug!(
                "Wheel: spin request dropped, {} segment(s)",
                self.segments.len()
            );
            return Some(SpinStart::NotEnoughSegments);
        }
        None
    }

    fn start(&mut self, index: usize) -> SpinStart {
        let Some(plan) = SpinPlanner::plan(
            self.rest_angle,
            index,
            &self.segments,
            &self.settings,
            self.rng.as_mut(),
        ) else {
            return SpinStart::NotEnoughSegments;
        };

        let label = self
            .segments
            .get(index)
            .map(|s| s.label.clone())
            .unwrap_or_default();

        log::debug!(
            "Wheel: spinning to {} ({:?}), {} turns over {:.3}s, {:.2}° → {:.2}°",
            index,
            label,
            plan.turns,
            plan.duration,
            plan.start_angle,
            plan.end_angle
        );

        self.active = Some(ActiveSpin {
            plan,
            elapsed: 0.0,
            label,
        });

        SpinStart::Started(plan)
    }

    /// Advance the animation by `dt` seconds
    ///
    /// Negative or non-finite `dt` counts as zero. A zero step changes
    /// nothing. The frame that reaches the plan's duration completes the
    /// spin: the wheel snaps to the exact end angle and the outcome is
    /// reported once.
    pub fn tick(&mut self, dt: f64) -> TickResult {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            if dt != 0.0 {
                log::debug!("Wheel: ignoring invalid frame step {}", dt);
            }
            0.0
        };

        let Some(active) = self.active.as_mut() else {
            return TickResult::at_rest(self.rest_angle);
        };

        if dt == 0.0 {
            return TickResult {
                orientation: active.plan.angle_at(active.elapsed),
                phase: SpinPhase::Spinning,
                finished: None,
            };
        }

        active.elapsed += dt;
        if active.plan.progress(active.elapsed) >= 1.0 {
            return self.complete();
        }

        let angle = active.plan.angle_at(active.elapsed);
        self.emit_orientation(angle);

        TickResult {
            orientation: angle,
            phase: SpinPhase::Spinning,
            finished: None,
        }
    }

    fn complete(&mut self) -> TickResult {
        let Some(active) = self.active.take() else {
            return TickResult::at_rest(self.rest_angle);
        };

        self.rest_angle = active.plan.end_angle;
        self.emit_orientation(self.rest_angle);

        let outcome = SpinOutcome {
            index: active.plan.target_index,
            label: active.label,
        };
        self.spins_completed += 1;

        log::info!(
            "Wheel: landed on {} ({:?}) at {:.2}°",
            outcome.index,
            outcome.label,
            self.rest_angle
        );

        if let Some(callback) = self.on_finished.as_mut() {
            callback(&outcome);
        }
        self.last_outcome = Some(outcome.clone());

        TickResult {
            orientation: self.rest_angle,
            phase: SpinPhase::Idle,
            finished: Some(outcome),
        }
    }

    /// Stop the running spin where it is, without reporting an outcome
    pub fn cancel(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        self.rest_angle = active.plan.angle_at(active.elapsed);
        self.emit_orientation(self.rest_angle);

        log::info!(
            "Wheel: spin to {} cancelled at {:.2}°",
            active.plan.target_index,
            self.rest_angle
        );
        true
    }

    fn emit_orientation(&mut self, angle: f64) {
        let label_rotation = self
            .keep_labels_upright
            .then(|| upright_label_rotation(angle));

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_orientation(angle, label_rotation);
        }
    }
}
