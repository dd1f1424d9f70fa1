//! # wf-wheel — Weighted Wheel of Fortune Core
//!
//! A circular selector split into weighted segments. A spin picks the winner
//! up front, plans a forward rotation that lands exactly on it, and animates
//! that plan one frame at a time.
//!
//! ## Features
//!
//! - **Weighted Selection**: Probability proportional to weight, uniform fallback when all weights are zero
//! - **Forward-Only Planning**: Whole extra turns plus the minimal forward delta to the target center
//! - **Frame-Driven Animation**: `tick(dt)` with easing curves, exact snap to the end pose
//! - **Deterministic**: All randomness comes from an injected, seedable source
//! - **Layout**: Slice and label geometry for the rendering layer
//!
//! ## Architecture
//!
//! ```text
//! SpinController
//!     │
//!     ├── SegmentSet ──────────────▶ WheelLayout ──▶ WheelRenderer
//!     │
//!     ├── WeightedSelector (index)
//!     ├── SpinPlanner (SpinPlan)
//!     └── tick(dt) ─── Easing ────▶ orientation ──▶ WheelRenderer
//!           │
//!           v
//!     SpinOutcome (once per completed spin)
//! ```

pub mod color;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod layout;
pub mod planner;
pub mod random;
pub mod segment;
pub mod selector;

pub use color::*;
pub use config::*;
pub use controller::*;
pub use easing::*;
pub use error::*;
pub use layout::*;
pub use planner::*;
pub use random::*;
pub use segment::*;
pub use selector::*;
