//! Firmware timing and actuation parameters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Actuation sequencing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmwareConfig {
    /// Command poll interval while idle (ms)
    pub poll_interval_ms: u64,
    /// Buzzer tone (Hz)
    pub buzzer_frequency_hz: u32,
    /// Buzzer duty while active (16-bit PWM scale)
    pub buzzer_duty: u16,
    /// Servo duty at 0 degrees
    pub servo_duty_min: u16,
    /// Servo duty at 180 degrees
    pub servo_duty_max: u16,
    /// Sweep step size (degrees)
    pub sweep_step_degrees: u16,
    /// Delay between sweep steps (ms)
    pub sweep_step_delay_ms: u64,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            buzzer_frequency_hz: 2000,
            buzzer_duty: 60_000,
            servo_duty_min: 2000,
            servo_duty_max: 10_000,
            sweep_step_degrees: 10,
            sweep_step_delay_ms: 20,
        }
    }
}

impl FirmwareConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn sweep_step_delay(&self) -> Duration {
        Duration::from_millis(self.sweep_step_delay_ms)
    }
}
