//! # wf-sim — Batch Spin Simulator
//!
//! Runs large numbers of seeded spins against a wheel configuration to check
//! that observed outcomes match the configured weights, and records
//! frame-by-frame traces of single spins.
//!
//! ```text
//! WheelConfig ──▶ simulate() ──▶ SimReport (counts, χ², deviation)
//!             └─▶ trace_spin() ─▶ SpinTrace (frames, outcome)
//! ```

pub mod report;
pub mod simulate;
pub mod trace;

pub use report::*;
pub use simulate::*;
pub use trace::*;
