//! Actuator Firmware Model
//!
//! Device side of the alert protocol: a single cooperative polling loop
//! that reads one command byte at a time and sequences LED, buzzer, and
//! servo outputs. Peripherals are injected through traits so the controller
//! runs identically against hardware bindings, a simulator, or test
//! doubles.

pub mod config;
pub mod controller;
pub mod peripherals;
pub mod servo;

pub use config::FirmwareConfig;
pub use controller::{ActuatorController, Phase};
pub use peripherals::{CommandPort, DigitalPin, PwmChannel};
pub use servo::angle_to_duty;
