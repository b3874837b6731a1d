//! Secondary flight-control surface logic.
//!
//! Each controller is a small state machine advanced once per simulated frame
//! by the host with fresh sensor values and the frame time:
//!
//! - [`trim`]: elevator and rudder trim targets driven by discrete events
//! - [`aileron`]: flap-dependent aileron droop with ground-spoiler anti-droop
//! - [`spoiler`]: spoiler handle, arming and automatic ground-spoiler
//!   deployment, in a phase-aware and a direct variant
//!
//! The only coupling between controllers is the ground-spoilers-active flag,
//! which the host passes from the spoiler controller to [`AileronDroop`] after
//! the spoiler update of the same frame.

pub mod aileron;
pub mod spoiler;
pub mod trim;

pub use aileron::{AileronDroop, AileronDroopConfig};
pub use spoiler::{
    DirectSpoilers, GroundSpoilers, PhasedSpoilers, SpoilerCommand, SpoilerConfig,
    SpoilerController, SpoilerFrame, SpoilerOutput, SpoilerPositions, SpoilerRequest,
    SpoilerVariant, ThrustLeverAngles, gear_strut_compression_from_animation,
};
pub use trim::{ElevatorTrim, ElevatorTrimConfig, RudderTrim, RudderTrimConfig, Trim, TrimLimits};
