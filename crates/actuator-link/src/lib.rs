//! Actuator Link
//!
//! Host side of the host↔microcontroller alert protocol: a one-byte,
//! unacknowledged command stream over a point-to-point serial transport,
//! plus the non-blocking dispatcher that drives the ON→dwell→OFF alert
//! sequence without stalling the frame-processing loop.

mod command;
mod dispatch;
mod error;
mod link;

pub mod testing;

pub use command::AlertCommand;
pub use dispatch::AlertDispatcher;
pub use error::LinkError;
pub use link::{ActuatorLink, LinkConfig};
