//! Frame-by-frame trace of a single spin

use serde::Serialize;

use wf_wheel::{SeededRandom, SpinController, SpinOutcome, SpinPlan, SpinStart, WheelConfig};

/// Frame rate used when the requested one is unusable
pub const DEFAULT_FPS: f64 = 60.0;

/// Accepted frame-rate range; rates outside are clamped
pub const MIN_FPS: f64 = 1.0;
pub const MAX_FPS: f64 = 1_000.0;

/// Upper bound on frames reserved up front
const PREALLOC_FRAMES: usize = 4_096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceFrame {
    /// Seconds since the spin started
    pub time: f64,
    /// Wheel orientation after this frame (degrees)
    pub orientation: f64,
}

/// Recorded spin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinTrace {
    pub seed: u64,
    pub fps: f64,
    /// `None` when the wheel could not spin
    pub plan: Option<SpinPlan>,
    pub frames: Vec<TraceFrame>,
    pub outcome: Option<SpinOutcome>,
}

/// Run one seeded spin at a fixed frame rate and record every frame
///
/// With `target` set the wheel lands on that segment (clamped to the last
/// one); otherwise the winner is drawn by weight.
pub fn trace_spin(config: &WheelConfig, seed: u64, target: Option<usize>, fps: f64) -> SpinTrace {
    let fps = sanitize_fps(fps);

    let mut controller = SpinController::from_config(config, SeededRandom::from_seed(seed));
    let start = match target {
        Some(index) => controller.spin_to_index(index),
        None => controller.spin(),
    };

    let SpinStart::Started(plan) = start else {
        log::warn!("Spin not started: {:?}", start);
        return SpinTrace {
            seed,
            fps,
            plan: None,
            frames: Vec::new(),
            outcome: None,
        };
    };

    let dt = 1.0 / fps;
    // Accumulated frame steps can fall just short of the duration
    let max_frames = ((plan.duration * fps).ceil() as usize).saturating_add(2);
    let mut frames = Vec::with_capacity(max_frames.min(PREALLOC_FRAMES));
    let mut outcome = None;

    for frame in 1..=max_frames {
        let result = controller.tick(dt);
        frames.push(TraceFrame {
            time: frame as f64 * dt,
            orientation: result.orientation,
        });
        if let Some(finished) = result.finished {
            outcome = Some(finished);
            break;
        }
    }

    log::debug!(
        "Traced {} frames at {} fps, outcome {:?}",
        frames.len(),
        fps,
        outcome
    );

    SpinTrace {
        seed,
        fps,
        plan: Some(plan),
        frames,
        outcome,
    }
}

fn sanitize_fps(fps: f64) -> f64 {
    if !fps.is_finite() || fps <= 0.0 {
        log::warn!("Invalid frame rate {}, using {}", fps, DEFAULT_FPS);
        return DEFAULT_FPS;
    }
    let clamped = fps.clamp(MIN_FPS, MAX_FPS);
    if clamped != fps {
        log::warn!("Frame rate {} out of range, using {}", fps, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use wf_wheel::FULL_TURN;

    #[test]
    fn test_trace_reaches_plan_end() {
        let config = WheelConfig::default();
        let trace = trace_spin(&config, 11, None, 60.0);

        let plan = trace.plan.unwrap();
        let last = trace.frames.last().unwrap();
        assert_eq!(last.orientation, plan.end_angle);

        let outcome = trace.outcome.unwrap();
        assert_eq!(outcome.index, plan.target_index);
        assert_eq!(outcome.label, config.segments[plan.target_index].label);
    }

    #[test]
    fn test_trace_is_monotonic() {
        let trace = trace_spin(&WheelConfig::default(), 5, Some(3), 30.0);

        for pair in trace.frames.windows(2) {
            assert!(pair[1].orientation >= pair[0].orientation);
        }
    }

    #[test]
    fn test_trace_target_lands_on_center() {
        let config = WheelConfig::default();
        let set = config.segment_set();
        let trace = trace_spin(&config, 2, Some(5), 60.0);

        let plan = trace.plan.unwrap();
        assert_eq!(plan.target_index, 5);
        assert_abs_diff_eq!(
            plan.end_angle.rem_euclid(FULL_TURN),
            set.center_angle(5).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_same_seed_same_trace() {
        let config = WheelConfig::default();
        assert_eq!(
            trace_spin(&config, 99, None, 60.0),
            trace_spin(&config, 99, None, 60.0)
        );
    }

    #[test]
    fn test_invalid_fps_falls_back() {
        let trace = trace_spin(&WheelConfig::default(), 1, None, 0.0);
        assert_eq!(trace.fps, DEFAULT_FPS);
        assert!(trace.outcome.is_some());
    }

    #[test]
    fn test_out_of_range_fps_is_clamped() {
        let fast = trace_spin(&WheelConfig::default(), 1, Some(0), 1e12);
        assert_eq!(fast.fps, MAX_FPS);
        assert!(fast.outcome.is_some());
        assert!(fast.frames.len() <= (4.5 * MAX_FPS) as usize + 2);

        let slow = trace_spin(&WheelConfig::default(), 1, Some(0), 1e-320);
        assert_eq!(slow.fps, MIN_FPS);
        assert!(slow.outcome.is_some());
    }

    #[test]
    fn test_single_segment_does_not_spin() {
        let mut config = WheelConfig::default();
        config.segments.truncate(1);

        let trace = trace_spin(&config, 1, None, 60.0);
        assert!(trace.plan.is_none());
        assert!(trace.frames.is_empty());
        assert!(trace.outcome.is_none());
    }
}
