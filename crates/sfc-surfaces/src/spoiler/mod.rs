//! Spoiler handle, arming and ground-spoiler deployment.
//!
//! Two strategies share one contract ([`GroundSpoilers`]):
//!
//! - [`PhasedSpoilers`]: full logic with takeoff/landing phase detection,
//!   automatic ground-spoiler deployment and the inhibit window
//! - [`DirectSpoilers`]: the handle position is the output; no automatic
//!   deployment
//!
//! [`SpoilerController`] picks one at construction from
//! [`SpoilerConfig::variant`].
//!
//! The host never mutates the handle directly. Discrete pilot events are
//! either applied one by one between frames ([`GroundSpoilers::execute`]) or
//! folded into a [`SpoilerRequest`] (see [`SpoilerCommand::apply`]) that is
//! passed with the next frame; a request equal to the current state is not a
//! change and triggers nothing.

mod conditions;
mod direct;
mod phased;

pub use conditions::Conditions;
pub use direct::DirectSpoilers;
pub use phased::{Inhibit, LandingPhase, PhasedSpoilers};

use serde::{Deserialize, Serialize};
use sfc_controls::{ControlError, ControlResult};
use sfc_core::clamp_unit;

use crate::trim::RAW_EVENT_FULL_SCALE;

/// Handle fully retracted.
pub const HANDLE_RETRACTED: f64 = 0.0;
/// Handle fully extended.
pub const HANDLE_FULL: f64 = 1.0;

/// Strut compression from the gear animation position.
///
/// The animation reports 0.5 for a fully extended strut and 1.0 for a fully
/// compressed one.
pub fn gear_strut_compression_from_animation(animation_position: f64) -> f64 {
    clamp_unit(2.0 * (animation_position - 0.5))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpoilerVariant {
    #[default]
    Phased,
    Direct,
}

/// Thrust lever angle thresholds in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustLeverAngles {
    pub idle: f64,
    pub climb: f64,
    pub mct: f64,
    pub touch_and_go: f64,
}

impl Default for ThrustLeverAngles {
    fn default() -> Self {
        Self {
            idle: 0.0,
            climb: 25.0,
            mct: 35.0,
            touch_and_go: 20.0,
        }
    }
}

/// Commanded spoiler positions, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilerPositions {
    pub retracted: f64,
    pub partial: f64,
    pub autopilot_limit: f64,
    pub full: f64,
}

impl Default for SpoilerPositions {
    fn default() -> Self {
        Self {
            retracted: 0.0,
            partial: 0.25,
            autopilot_limit: 0.5,
            full: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilerConfig {
    pub variant: SpoilerVariant,
    /// Seconds the handle must sit retracted before an inhibit clears.
    pub inhibit_cooldown: f64,
    /// Seconds airborne before the landing phase arms.
    pub minimum_airborne_time: f64,
    /// Knots.
    pub ground_speed_threshold: f64,
    /// Strut compression above which a main gear counts as on ground.
    pub gear_on_ground_compression: f64,
    /// Flaps handle index of the full-flaps detent.
    pub flaps_full_index: u8,
    pub thrust_lever_angles: ThrustLeverAngles,
    pub positions: SpoilerPositions,
}

impl Default for SpoilerConfig {
    fn default() -> Self {
        Self {
            variant: SpoilerVariant::Phased,
            inhibit_cooldown: 10.0,
            minimum_airborne_time: 5.0,
            ground_speed_threshold: 72.0,
            gear_on_ground_compression: 0.1,
            flaps_full_index: 5,
            thrust_lever_angles: ThrustLeverAngles::default(),
            positions: SpoilerPositions::default(),
        }
    }
}

impl SpoilerConfig {
    pub fn validate(&self) -> ControlResult<()> {
        let non_negative = |v: f64, what: &'static str| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ControlError::InvalidArg { what })
            }
        };
        non_negative(self.inhibit_cooldown, "inhibit cooldown must be non-negative")?;
        non_negative(
            self.minimum_airborne_time,
            "minimum airborne time must be non-negative",
        )?;
        non_negative(
            self.ground_speed_threshold,
            "ground speed threshold must be non-negative",
        )?;
        if !(0.0..1.0).contains(&self.gear_on_ground_compression) {
            return Err(ControlError::InvalidArg {
                what: "gear on-ground compression must be in [0, 1)",
            });
        }

        let tla = &self.thrust_lever_angles;
        if !(tla.idle < tla.climb && tla.climb < tla.mct) {
            return Err(ControlError::InvalidRange {
                what: "thrust lever angles idle < climb < mct",
                low: tla.idle,
                high: tla.mct,
            });
        }
        if !(tla.idle < tla.touch_and_go && tla.touch_and_go < tla.mct) {
            return Err(ControlError::InvalidRange {
                what: "touch-and-go thrust lever angle",
                low: tla.idle,
                high: tla.mct,
            });
        }

        let p = &self.positions;
        for v in [p.retracted, p.partial, p.autopilot_limit, p.full] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ControlError::InvalidArg {
                    what: "spoiler positions must be in [0, 1]",
                });
            }
        }
        if !(p.retracted <= p.partial && p.partial <= p.full && p.autopilot_limit <= p.full) {
            return Err(ControlError::InvalidRange {
                what: "spoiler positions retracted <= partial <= full",
                low: p.retracted,
                high: p.full,
            });
        }
        Ok(())
    }
}

/// Requested arming and handle position for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpoilerRequest {
    pub armed: bool,
    pub handle_position: f64,
}

/// Discrete pilot events acting on the spoiler handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SpoilerCommand {
    On,
    Off,
    Toggle,
    /// Raw value, 0..16384 full scale.
    Set(f64),
    /// Raw axis value, -16384..16384 full scale.
    AxisSet(f64),
    ArmOn,
    ArmOff,
    ArmToggle,
    ArmSet(bool),
}

impl SpoilerCommand {
    /// Fold this command over a request.
    pub fn apply(self, current: SpoilerRequest) -> SpoilerRequest {
        let SpoilerRequest {
            armed,
            handle_position,
        } = current;
        let handle = |handle_position| SpoilerRequest {
            armed,
            handle_position,
        };
        let arm = |armed| SpoilerRequest {
            armed,
            handle_position,
        };
        match self {
            Self::On => handle(HANDLE_FULL),
            Self::Off => handle(HANDLE_RETRACTED),
            Self::Toggle if handle_position > HANDLE_RETRACTED => handle(HANDLE_RETRACTED),
            Self::Toggle => handle(HANDLE_FULL),
            Self::Set(raw) => handle(clamp_unit(raw / RAW_EVENT_FULL_SCALE)),
            Self::AxisSet(raw) => handle(clamp_unit(0.5 + raw / (2.0 * RAW_EVENT_FULL_SCALE))),
            Self::ArmOn => arm(true),
            Self::ArmOff => arm(false),
            Self::ArmToggle => arm(!armed),
            Self::ArmSet(value) => arm(value),
        }
    }
}

/// Per-frame sensor snapshot and request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpoilerFrame {
    /// Monotonic simulation clock (seconds).
    pub simulation_time: f64,
    pub autopilot_engaged: bool,
    /// Knots.
    pub ground_speed: f64,
    /// Degrees, engines 1 and 2.
    pub thrust_lever_angles: [f64; 2],
    /// Strut compression fractions, left and right main gear.
    pub gear_compression: [f64; 2],
    pub flaps_handle_index: u8,
    pub aoa_protection_active: bool,
    pub request: SpoilerRequest,
}

/// Flat actuator snapshot written back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpoilerOutput {
    pub armed: bool,
    pub handle_position: f64,
    pub sim_position: f64,
    pub ground_spoilers_active: bool,
}

/// Contract shared by both spoiler strategies.
pub trait GroundSpoilers {
    /// Set arming and handle position once; later calls are ignored.
    fn initialize(&mut self, armed: bool, handle_position: f64);

    fn is_initialized(&self) -> bool;

    /// Apply a pilot request immediately, between frames.
    ///
    /// Each call is its own manual change, so a sequence of requests leaves
    /// the same state as delivering them one per frame.
    fn command(&mut self, request: SpoilerRequest);

    /// Advance one frame.
    fn update(&mut self, frame: &SpoilerFrame) -> SpoilerOutput;

    fn is_armed(&self) -> bool;

    fn handle_position(&self) -> f64;

    /// Commanded actuator position.
    fn sim_position(&self) -> f64;

    fn ground_spoilers_active(&self) -> bool;

    /// Current state expressed as a request; the base for folding commands.
    fn request(&self) -> SpoilerRequest {
        SpoilerRequest {
            armed: self.is_armed(),
            handle_position: self.handle_position(),
        }
    }

    /// Apply one pilot event on top of the current state.
    fn execute(&mut self, command: SpoilerCommand) {
        let request = command.apply(self.request());
        self.command(request);
    }

    fn output(&self) -> SpoilerOutput {
        SpoilerOutput {
            armed: self.is_armed(),
            handle_position: self.handle_position(),
            sim_position: self.sim_position(),
            ground_spoilers_active: self.ground_spoilers_active(),
        }
    }
}

/// Spoiler strategy selected at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpoilerController {
    Phased(PhasedSpoilers),
    Direct(DirectSpoilers),
}

impl SpoilerController {
    pub fn new(config: &SpoilerConfig) -> ControlResult<Self> {
        config.validate()?;
        tracing::debug!(variant = ?config.variant, "spoiler controller");
        Ok(match config.variant {
            SpoilerVariant::Phased => Self::Phased(PhasedSpoilers::new(*config)),
            SpoilerVariant::Direct => Self::Direct(DirectSpoilers::new()),
        })
    }

    pub fn variant(&self) -> SpoilerVariant {
        match self {
            Self::Phased(_) => SpoilerVariant::Phased,
            Self::Direct(_) => SpoilerVariant::Direct,
        }
    }

    fn inner(&self) -> &dyn GroundSpoilers {
        match self {
            Self::Phased(s) => s,
            Self::Direct(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn GroundSpoilers {
        match self {
            Self::Phased(s) => s,
            Self::Direct(s) => s,
        }
    }
}

impl GroundSpoilers for SpoilerController {
    fn initialize(&mut self, armed: bool, handle_position: f64) {
        self.inner_mut().initialize(armed, handle_position)
    }

    fn is_initialized(&self) -> bool {
        self.inner().is_initialized()
    }

    fn command(&mut self, request: SpoilerRequest) {
        self.inner_mut().command(request)
    }

    fn update(&mut self, frame: &SpoilerFrame) -> SpoilerOutput {
        self.inner_mut().update(frame)
    }

    fn is_armed(&self) -> bool {
        self.inner().is_armed()
    }

    fn handle_position(&self) -> f64 {
        self.inner().handle_position()
    }

    fn sim_position(&self) -> f64 {
        self.inner().sim_position()
    }

    fn ground_spoilers_active(&self) -> bool {
        self.inner().ground_spoilers_active()
    }
}
