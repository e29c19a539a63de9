//! DriveGuard
//!
//! Wires the per-frame pipeline together: landmark extraction → EAR →
//! drowsiness state machine → sleep event recording + non-blocking actuator
//! dispatch.

pub mod config;
pub mod session;
pub mod synthetic;

pub use config::DriveGuardConfig;
pub use session::{DetectionSession, FrameSource, SessionError, SessionStats};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
