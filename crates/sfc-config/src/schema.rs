//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use sfc_surfaces::{AileronDroopConfig, ElevatorTrimConfig, RudderTrimConfig, SpoilerConfig};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            controls: ControlsConfig::default(),
        }
    }
}

/// Settings for every controller a session runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub spoilers: SpoilerConfig,
    pub elevator_trim: ElevatorTrimConfig,
    pub rudder_trim: RudderTrimConfig,
    pub ailerons: AileronDroopConfig,
}
