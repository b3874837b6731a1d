//! Configuration validation.
//!
//! Each section is checked by building the controller it configures, so the
//! rules live next to the controllers and a file that validates here is
//! guaranteed to construct.

use crate::schema::{ConfigFile, ControlsConfig, LATEST_VERSION};
use sfc_controls::ControlError;
use sfc_surfaces::{AileronDroop, ElevatorTrim, RudderTrim, SpoilerController};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid {section}: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: ControlError,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &ConfigFile) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    validate_controls(&config.controls)
}

pub fn validate_controls(controls: &ControlsConfig) -> Result<(), ValidationError> {
    fn section<T>(
        section: &'static str,
        result: Result<T, ControlError>,
    ) -> Result<(), ValidationError> {
        result
            .map(|_| ())
            .map_err(|source| ValidationError::InvalidSection { section, source })
    }

    section("spoilers", SpoilerController::new(&controls.spoilers))?;
    section("elevator_trim", ElevatorTrim::new(&controls.elevator_trim))?;
    section("rudder_trim", RudderTrim::new(&controls.rudder_trim))?;
    section("ailerons", AileronDroop::new(&controls.ailerons))?;
    Ok(())
}
