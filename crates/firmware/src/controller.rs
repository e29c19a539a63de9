//! Actuation state machine
//!
//! One cooperative loop, no interrupts. Instead of literal sleeps, the
//! servo sweep is a phase with a busy-until deadline per step; while a
//! sweep is in progress the command port is not polled, so bytes arriving
//! mid-sweep may be missed. Known limitation, kept to match the deployed
//! behavior.

use crate::config::FirmwareConfig;
use crate::peripherals::{CommandPort, DigitalPin, PwmChannel};
use crate::servo::angle_to_duty;
use actuator_link::AlertCommand;
use std::time::Instant;
use tracing::{debug, info};

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// All outputs released, polling for commands
    Idle,
    /// Servo sweep in progress; the port is not polled until it completes
    Sweep,
    /// Sweep done, servo torque released, LED/buzzer still driven
    Hold,
}

#[derive(Debug, Clone, Copy)]
struct SweepStep {
    /// Last commanded angle (degrees)
    angle: u16,
    ascending: bool,
    /// Deadline for the next step
    due: Instant,
}

/// Device-side actuator controller.
///
/// Dispatches one command byte per poll: `'1'` drives LED and buzzer and
/// starts the 0°→180°→0° servo sweep, `'0'` releases everything. Unknown
/// bytes are ignored.
pub struct ActuatorController<P, L, B, S> {
    port: P,
    led: L,
    buzzer: B,
    servo: S,
    config: FirmwareConfig,
    phase: Phase,
    sweep: Option<SweepStep>,
}

impl<P, L, B, S> ActuatorController<P, L, B, S>
where
    P: CommandPort,
    L: DigitalPin,
    B: PwmChannel,
    S: PwmChannel,
{
    pub fn new(port: P, led: L, buzzer: B, servo: S, config: FirmwareConfig) -> Self {
        Self {
            port,
            led,
            buzzer,
            servo,
            config,
            phase: Phase::Idle,
            sweep: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the next sweep step is due, if a sweep is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sweep.map(|s| s.due)
    }

    /// One iteration of the cooperative loop.
    ///
    /// In `Sweep` the port is left untouched and only the deadline is
    /// serviced; otherwise at most one byte is read and dispatched.
    pub fn poll(&mut self, now: Instant) {
        if self.phase == Phase::Sweep {
            self.advance_sweep(now);
            return;
        }
        if let Some(byte) = self.port.read_byte() {
            self.dispatch(byte, now);
        }
    }

    fn dispatch(&mut self, byte: u8, now: Instant) {
        match AlertCommand::from_byte(byte) {
            Some(AlertCommand::Activate) => {
                info!("Activate received: driving LED, buzzer, servo sweep");
                self.led.set_high();
                self.buzzer.set_frequency(self.config.buzzer_frequency_hz);
                self.buzzer.set_duty(self.config.buzzer_duty);

                self.servo.set_duty(self.duty_for(0));
                self.phase = Phase::Sweep;
                self.sweep = Some(SweepStep {
                    angle: 0,
                    ascending: true,
                    due: now + self.config.sweep_step_delay(),
                });
            }
            Some(AlertCommand::Deactivate) => {
                info!("Deactivate received: releasing all outputs");
                self.led.set_low();
                self.buzzer.set_duty(0);
                self.servo.set_duty(0);
                self.phase = Phase::Idle;
                self.sweep = None;
            }
            None => {
                debug!(byte, "Ignoring unknown command byte");
            }
        }
    }

    fn advance_sweep(&mut self, now: Instant) {
        let Some(step) = self.sweep else {
            self.phase = Phase::Idle;
            return;
        };
        if now < step.due {
            return;
        }

        let step_size = self.config.sweep_step_degrees;
        let due = step.due + self.config.sweep_step_delay();

        if step.ascending {
            if step.angle < 180 {
                let next = (step.angle + step_size).min(180);
                self.servo.set_duty(self.duty_for(next));
                self.sweep = Some(SweepStep {
                    angle: next,
                    ascending: true,
                    due,
                });
            } else {
                // Top of the sweep: the downward pass re-commands 180
                self.servo.set_duty(self.duty_for(180));
                self.sweep = Some(SweepStep {
                    angle: 180,
                    ascending: false,
                    due,
                });
            }
        } else if step.angle > 0 {
            let next = step.angle.saturating_sub(step_size);
            self.servo.set_duty(self.duty_for(next));
            self.sweep = Some(SweepStep {
                angle: next,
                ascending: false,
                due,
            });
        } else {
            // Sweep complete: release holding torque, keep LED/buzzer on
            self.servo.set_duty(0);
            self.sweep = None;
            self.phase = Phase::Hold;
            debug!("Servo sweep complete, torque released");
        }
    }

    fn duty_for(&self, angle: u16) -> u16 {
        angle_to_duty(angle, self.config.servo_duty_min, self.config.servo_duty_max)
    }

    /// Cooperative loop: poll every `poll_interval`, or at the sweep step
    /// cadence while a sweep is running. Never returns.
    pub async fn run(&mut self) {
        loop {
            let wait = match self.next_deadline() {
                Some(due) => due.saturating_duration_since(Instant::now()),
                None => self.config.poll_interval(),
            };
            tokio::time::sleep(wait).await;
            self.poll(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::{RecordedPin, RecordedPwm, ScriptedPort};
    use std::time::Duration;

    struct Rig {
        port: ScriptedPort,
        led: RecordedPin,
        buzzer: RecordedPwm,
        servo: RecordedPwm,
        controller: ActuatorController<ScriptedPort, RecordedPin, RecordedPwm, RecordedPwm>,
    }

    fn rig() -> Rig {
        let port = ScriptedPort::new();
        let led = RecordedPin::new();
        let buzzer = RecordedPwm::new();
        let servo = RecordedPwm::new();
        let controller = ActuatorController::new(
            port.clone(),
            led.clone(),
            buzzer.clone(),
            servo.clone(),
            FirmwareConfig::default(),
        );
        Rig {
            port,
            led,
            buzzer,
            servo,
            controller,
        }
    }

    fn run_out_sweep(rig: &mut Rig, mut now: Instant) -> Instant {
        while rig.controller.phase() == Phase::Sweep {
            now += Duration::from_millis(20);
            rig.controller.poll(now);
        }
        now
    }

    #[test]
    fn test_activate_drives_outputs_and_sweeps() {
        let mut rig = rig();
        let start = Instant::now();

        rig.port.push(b"1");
        rig.controller.poll(start);

        assert!(rig.led.is_high());
        assert_eq!(rig.buzzer.frequency_hz(), 2000);
        assert_eq!(rig.buzzer.duty(), 60_000);
        assert_eq!(rig.controller.phase(), Phase::Sweep);

        run_out_sweep(&mut rig, start);

        // 0..=180 up, 180..=0 down (180 re-commanded at the turn), then release
        let history = rig.servo.duty_history();
        let mut expected: Vec<u16> = (0..=18).map(|i| angle_to_duty(i * 10, 2000, 10_000)).collect();
        expected.extend((0..=18).rev().map(|i| angle_to_duty(i * 10, 2000, 10_000)));
        expected.push(0);
        assert_eq!(history, expected);

        // Torque released, LED/buzzer still driven
        assert_eq!(rig.controller.phase(), Phase::Hold);
        assert_eq!(rig.servo.duty(), 0);
        assert!(rig.led.is_high());
        assert_eq!(rig.buzzer.duty(), 60_000);
    }

    #[test]
    fn test_deactivate_releases_everything() {
        let mut rig = rig();
        let start = Instant::now();

        rig.port.push(b"1");
        rig.controller.poll(start);
        let now = run_out_sweep(&mut rig, start);

        rig.port.push(b"0");
        rig.controller.poll(now + Duration::from_millis(50));

        assert!(!rig.led.is_high());
        assert_eq!(rig.buzzer.duty(), 0);
        assert_eq!(rig.servo.duty(), 0);
        assert_eq!(rig.controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_bytes_during_sweep_are_not_observed() {
        let mut rig = rig();
        let start = Instant::now();

        rig.port.push(b"1");
        rig.controller.poll(start);

        // Deactivate arrives mid-sweep; the port is not polled until the
        // sweep completes
        rig.port.push(b"0");
        let mut now = start + Duration::from_millis(20);
        rig.controller.poll(now);
        assert_eq!(rig.port.pending(), 1);
        assert!(rig.led.is_high());

        now = run_out_sweep(&mut rig, now);
        assert_eq!(rig.controller.phase(), Phase::Hold);

        // Next poll after the sweep picks it up
        rig.controller.poll(now + Duration::from_millis(50));
        assert_eq!(rig.port.pending(), 0);
        assert!(!rig.led.is_high());
    }

    #[test]
    fn test_unknown_bytes_are_ignored() {
        let mut rig = rig();
        rig.port.push(b"x");
        rig.controller.poll(Instant::now());
        assert_eq!(rig.controller.phase(), Phase::Idle);
        assert!(!rig.led.is_high());
        assert!(rig.servo.duty_history().is_empty());
    }

    #[test]
    fn test_sweep_step_waits_for_deadline() {
        let mut rig = rig();
        let start = Instant::now();

        rig.port.push(b"1");
        rig.controller.poll(start);
        assert_eq!(rig.servo.duty_history().len(), 1);

        // Before the step deadline nothing advances
        rig.controller.poll(start + Duration::from_millis(10));
        assert_eq!(rig.servo.duty_history().len(), 1);

        rig.controller.poll(start + Duration::from_millis(20));
        assert_eq!(rig.servo.duty_history().len(), 2);
        assert_eq!(rig.servo.duty(), angle_to_duty(10, 2000, 10_000));
    }
}
