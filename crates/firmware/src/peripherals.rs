//! Peripheral abstractions
//!
//! The controller owns its peripherals through these traits instead of
//! module-level hardware globals, so a board binding, a simulator, and the
//! tests all drive the same sequencing logic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Digital output pin (LED)
pub trait DigitalPin {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// PWM output channel (buzzer, servo). Duty uses the 16-bit scale.
pub trait PwmChannel {
    fn set_frequency(&mut self, hz: u32);
    fn set_duty(&mut self, duty: u16);
}

/// Byte-at-a-time command input (USB CDC data channel)
pub trait CommandPort {
    /// Read one byte if available; `None` when the buffer is empty
    fn read_byte(&mut self) -> Option<u8>;
}

/// Recording pin double for tests and simulation
#[derive(Debug, Clone, Default)]
pub struct RecordedPin {
    state: Arc<Mutex<bool>>,
}

impl RecordedPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        *self.state.lock().expect("pin lock")
    }
}

impl DigitalPin for RecordedPin {
    fn set_high(&mut self) {
        *self.state.lock().expect("pin lock") = true;
    }

    fn set_low(&mut self) {
        *self.state.lock().expect("pin lock") = false;
    }
}

/// Recording PWM double: keeps the current settings and the full history of
/// duty writes (the servo sweep shows up as that history).
#[derive(Debug, Clone, Default)]
pub struct RecordedPwm {
    inner: Arc<Mutex<PwmRecord>>,
}

#[derive(Debug, Default)]
struct PwmRecord {
    frequency_hz: u32,
    duty: u16,
    duty_history: Vec<u16>,
}

impl RecordedPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency_hz(&self) -> u32 {
        self.inner.lock().expect("pwm lock").frequency_hz
    }

    pub fn duty(&self) -> u16 {
        self.inner.lock().expect("pwm lock").duty
    }

    pub fn duty_history(&self) -> Vec<u16> {
        self.inner.lock().expect("pwm lock").duty_history.clone()
    }
}

impl PwmChannel for RecordedPwm {
    fn set_frequency(&mut self, hz: u32) {
        self.inner.lock().expect("pwm lock").frequency_hz = hz;
    }

    fn set_duty(&mut self, duty: u16) {
        let mut record = self.inner.lock().expect("pwm lock");
        record.duty = duty;
        record.duty_history.push(duty);
    }
}

/// Scripted byte source standing in for the serial receive buffer
#[derive(Debug, Clone, Default)]
pub struct ScriptedPort {
    buffer: Arc<Mutex<VecDeque<u8>>>,
}

impl ScriptedPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the receive buffer
    pub fn push(&self, bytes: &[u8]) {
        self.buffer.lock().expect("port lock").extend(bytes);
    }

    /// Bytes still unread
    pub fn pending(&self) -> usize {
        self.buffer.lock().expect("port lock").len()
    }
}

impl CommandPort for ScriptedPort {
    fn read_byte(&mut self) -> Option<u8> {
        self.buffer.lock().expect("port lock").pop_front()
    }
}
