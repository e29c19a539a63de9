//! Drowsiness Detection State Machine
//!
//! Turns a noisy per-frame eye-openness metric into a latched "drowsy"
//! decision: a run of consecutive sub-threshold frames enters `Alerting`
//! exactly once, and the latch holds until an open-eye frame resets it.

pub mod config;
pub mod state;

pub use config::DrowsinessConfig;
pub use state::{DrowsinessEvent, DrowsinessState, DrowsinessTracker};
