//! Drowsiness state tracking

use crate::DrowsinessConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Drowsiness state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrowsinessState {
    /// Eyes open (or an open frame just reset the run)
    #[default]
    Awake,
    /// Sub-threshold run in progress but not yet long enough to alert
    Drowsy,
    /// Latched: the closure threshold was reached; holds until an open frame
    Alerting,
}

/// Event emitted by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrowsinessEvent {
    /// Entered `Alerting`. Emitted exactly once per contiguous
    /// sub-threshold run; a new event requires an intervening open frame.
    EnterAlerting,
}

/// Per-frame hysteresis tracker over the EAR metric.
///
/// Invariant: `consecutive_closed_frames` always equals the length of the
/// current unbroken run of samples below the threshold.
#[derive(Debug, Clone)]
pub struct DrowsinessTracker {
    config: DrowsinessConfig,
    state: DrowsinessState,
    consecutive_closed_frames: u32,
}

impl DrowsinessTracker {
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            state: DrowsinessState::Awake,
            consecutive_closed_frames: 0,
        }
    }

    /// Feed one frame's metric into the machine.
    ///
    /// A sample exactly at the threshold counts as open. Returns
    /// `Some(EnterAlerting)` on the single frame where the latch engages.
    pub fn observe(&mut self, metric: f32) -> Option<DrowsinessEvent> {
        if metric < self.config.ear_threshold {
            self.consecutive_closed_frames += 1;

            if self.consecutive_closed_frames >= self.config.consecutive_frames
                && self.state != DrowsinessState::Alerting
            {
                self.state = DrowsinessState::Alerting;
                info!(
                    closed_frames = self.consecutive_closed_frames,
                    "Driver drowsiness detected, entering alert"
                );
                return Some(DrowsinessEvent::EnterAlerting);
            }

            if self.state == DrowsinessState::Awake {
                self.state = DrowsinessState::Drowsy;
                debug!("Eye closure run started");
            }
        } else {
            // Silent exit from Alerting: no explicit wake event
            self.state = DrowsinessState::Awake;
            self.consecutive_closed_frames = 0;
        }

        None
    }

    pub fn state(&self) -> DrowsinessState {
        self.state
    }

    /// Length of the current unbroken sub-threshold run
    pub fn consecutive_closed_frames(&self) -> u32 {
        self.consecutive_closed_frames
    }

    /// Reset to `Awake` (on driver change)
    pub fn reset(&mut self) {
        self.state = DrowsinessState::Awake;
        self.consecutive_closed_frames = 0;
    }
}
