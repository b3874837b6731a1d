//! Aileron droop.
//!
//! With flaps extended both ailerons droop to carry part of the flap lift;
//! positions are in the roll-command sense, so the left and right droop
//! constants carry opposite signs. When ground spoilers deploy the ailerons
//! are driven to a fixed anti-droop position instead, ignoring roll input.

use serde::{Deserialize, Serialize};
use sfc_controls::{ControlError, ControlResult, RateLimiter};
use sfc_core::clamp_or_low;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AileronDroopConfig {
    /// Surface rate (position units per second).
    pub rate: f64,
    /// Flap angle (degrees) where droop starts.
    pub flaps_reference: f64,
    /// Flap angle (degrees) at which droop is complete.
    pub flaps_full: f64,
    pub droop_left: f64,
    pub droop_right: f64,
    pub anti_droop_left: f64,
    pub anti_droop_right: f64,
}

impl Default for AileronDroopConfig {
    fn default() -> Self {
        Self {
            rate: 0.5,
            flaps_reference: 10.0,
            flaps_full: 40.0,
            droop_left: 0.2,
            droop_right: -0.2,
            anti_droop_left: -0.24,
            anti_droop_right: 0.24,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AileronDroop {
    config: AileronDroopConfig,
    left: RateLimiter,
    right: RateLimiter,
    last_ground_spoilers_active: bool,
}

impl AileronDroop {
    pub fn new(config: &AileronDroopConfig) -> ControlResult<Self> {
        if !(config.flaps_full > config.flaps_reference) {
            return Err(ControlError::InvalidRange {
                what: "aileron droop flap angles",
                low: config.flaps_reference,
                high: config.flaps_full,
            });
        }
        Ok(Self {
            config: *config,
            left: RateLimiter::new(config.rate)?,
            right: RateLimiter::new(config.rate)?,
            last_ground_spoilers_active: false,
        })
    }

    /// Fraction of full droop for a flap angle, in `[0, 1]`.
    pub fn droop_fraction(&self, flaps_position: f64) -> f64 {
        let span = self.config.flaps_full - self.config.flaps_reference;
        clamp_or_low((flaps_position - self.config.flaps_reference) / span, 0.0, 1.0)
    }

    pub fn update(
        &mut self,
        ground_spoilers_active: bool,
        flaps_position: f64,
        roll_command: f64,
        dt: f64,
    ) {
        if ground_spoilers_active != self.last_ground_spoilers_active {
            debug!(ground_spoilers_active, "aileron anti-droop changed");
            self.last_ground_spoilers_active = ground_spoilers_active;
        }

        let (target_left, target_right) = if ground_spoilers_active {
            (self.config.anti_droop_left, self.config.anti_droop_right)
        } else {
            let fraction = self.droop_fraction(flaps_position);
            let roll = if roll_command.is_nan() { 0.0 } else { roll_command };
            (
                (fraction * self.config.droop_left + roll).clamp(-1.0, 1.0),
                (fraction * self.config.droop_right + roll).clamp(-1.0, 1.0),
            )
        };

        self.left.update(target_left, dt);
        self.right.update(target_right, dt);
    }

    pub fn left_position(&self) -> f64 {
        self.left.value()
    }

    pub fn right_position(&self) -> f64 {
        self.right.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn droop() -> AileronDroop {
        AileronDroop::new(&AileronDroopConfig::default()).unwrap()
    }

    #[test]
    fn no_droop_with_flaps_up() {
        let mut ailerons = droop();
        ailerons.update(false, 0.0, 0.0, 1.0);
        assert_eq!(ailerons.left_position(), 0.0);
        assert_eq!(ailerons.right_position(), 0.0);
    }

    #[test]
    fn full_droop_is_opposite_per_side() {
        let mut ailerons = droop();
        ailerons.update(false, 40.0, 0.0, 10.0);
        assert!((ailerons.left_position() - 0.2).abs() < 1e-12);
        assert!((ailerons.right_position() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn partial_droop_scales_with_flaps() {
        let ailerons = droop();
        assert_eq!(ailerons.droop_fraction(25.0), 0.5);
        assert_eq!(ailerons.droop_fraction(5.0), 0.0);
        assert_eq!(ailerons.droop_fraction(60.0), 1.0);
    }

    #[test]
    fn roll_command_adds_and_clamps() {
        let mut ailerons = droop();
        ailerons.update(false, 40.0, 0.95, 10.0);
        assert_eq!(ailerons.left_position(), 1.0);
        assert!((ailerons.right_position() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn ground_spoilers_override_roll() {
        let mut ailerons = droop();
        ailerons.update(true, 40.0, 0.8, 10.0);
        assert_eq!(ailerons.left_position(), -0.24);
        assert_eq!(ailerons.right_position(), 0.24);
    }

    #[test]
    fn movement_is_rate_limited() {
        let mut ailerons = droop();
        ailerons.update(false, 40.0, 0.0, 0.2);
        assert!((ailerons.left_position() - 0.1).abs() < 1e-12);
        ailerons.update(false, 40.0, 0.0, 0.0);
        assert!((ailerons.left_position() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn invalid_flap_span() {
        let cfg = AileronDroopConfig {
            flaps_full: 5.0,
            ..Default::default()
        };
        assert!(AileronDroop::new(&cfg).is_err());
    }
}
