//! Drowsiness detection configuration

use serde::{Deserialize, Serialize};

/// Drowsiness detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR cutoff between open and closed classification.
    /// A sample exactly equal to the threshold counts as open.
    pub ear_threshold: f32,

    /// Consecutive sub-threshold frames required to latch `Alerting`
    /// (~3 seconds at 30fps with the default)
    pub consecutive_frames: u32,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.24,
            consecutive_frames: 90,
        }
    }
}

impl DrowsinessConfig {
    /// Strict config: alerts on shorter closures
    pub fn strict() -> Self {
        Self {
            consecutive_frames: 45,
            ..Default::default()
        }
    }

    /// Lenient config: tolerates longer closures and lower EAR
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.20,
            consecutive_frames: 150,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calibration() {
        let config = DrowsinessConfig::default();
        assert_eq!(config.ear_threshold, 0.24);
        assert_eq!(config.consecutive_frames, 90);
    }
}
