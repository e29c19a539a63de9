//! Layered application configuration
//!
//! Defaults ← optional TOML file ← `DRIVEGUARD_*` environment overrides
//! (e.g. `DRIVEGUARD_DETECTION__EAR_THRESHOLD=0.22`).

use actuator_link::LinkConfig;
use config::{Config, ConfigError, Environment, File};
use drowsiness::DrowsinessConfig;
use serde::{Deserialize, Serialize};
use vision::EyeSelection;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriveGuardConfig {
    /// Drowsiness decision parameters
    #[serde(default)]
    pub detection: DrowsinessConfig,
    /// Which landmark ids feed the EAR formula
    #[serde(default)]
    pub eyes: EyeSelection,
    /// Serial link bring-up and alert timing
    #[serde(default)]
    pub link: LinkConfig,
}

impl DriveGuardConfig {
    /// Load configuration, layering an optional file and env overrides on
    /// top of the defaults
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&DriveGuardConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DRIVEGUARD")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }
}
