//! Frame sequencing for all secondary flight controls.
//!
//! A [`Session`] owns one instance of every controller. Each frame it reads
//! sensors from the host registry, applies the queued events, advances the
//! controllers in a fixed order (spoilers, then ailerons with the fresh
//! ground-spoiler flag, then trims) and writes the results back.

use serde::Serialize;
use sfc_config::ControlsConfig;
use sfc_core::units::{Time, as_seconds};
use sfc_core::{clamp_unit, sanitize_dt};
use sfc_surfaces::{
    AileronDroop, ElevatorTrim, GroundSpoilers, RudderTrim, SpoilerController, SpoilerFrame,
    SpoilerOutput, Trim, gear_strut_compression_from_animation,
};
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::events::HostEvent;
use crate::registry::VariableRegistry;
use crate::vars;

/// Everything a session produced in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutputs {
    pub simulation_time: f64,
    pub spoilers: SpoilerOutput,
    pub aileron_left: f64,
    pub aileron_right: f64,
    pub elevator_trim: f64,
    pub rudder_trim: f64,
}

#[derive(Debug, Clone)]
pub struct Session {
    spoilers: SpoilerController,
    elevator_trim: ElevatorTrim,
    rudder_trim: RudderTrim,
    ailerons: AileronDroop,
    pending: VecDeque<HostEvent>,
    simulation_time: f64,
    started: bool,
}

impl Session {
    pub fn new(controls: &ControlsConfig) -> AppResult<Self> {
        Ok(Self {
            spoilers: SpoilerController::new(&controls.spoilers)?,
            elevator_trim: ElevatorTrim::new(&controls.elevator_trim)?,
            rudder_trim: RudderTrim::new(&controls.rudder_trim)?,
            ailerons: AileronDroop::new(&controls.ailerons)?,
            pending: VecDeque::new(),
            simulation_time: 0.0,
            started: false,
        })
    }

    /// Queue an event for the next frame. Events apply in arrival order.
    pub fn queue_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Seconds of simulation advanced so far.
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    pub fn spoilers(&self) -> &SpoilerController {
        &self.spoilers
    }

    pub fn elevator_trim(&self) -> &ElevatorTrim {
        &self.elevator_trim
    }

    pub fn rudder_trim(&self) -> &RudderTrim {
        &self.rudder_trim
    }

    pub fn ailerons(&self) -> &AileronDroop {
        &self.ailerons
    }

    /// Advance every controller by one frame.
    pub fn step<R>(&mut self, registry: &mut R, dt: Time) -> FrameOutputs
    where
        R: VariableRegistry + ?Sized,
    {
        let raw_dt = as_seconds(dt);
        let dt = sanitize_dt(raw_dt);
        if dt != raw_dt {
            warn!(dt = raw_dt, "invalid frame time treated as zero");
        }

        if !self.started {
            self.start(registry);
        }
        self.simulation_time += dt;

        while let Some(event) = self.pending.pop_front() {
            match event.spoiler_command() {
                Some(cmd) => self.spoilers.execute(cmd),
                None => self.apply_trim_event(event),
            }
        }

        let frame = SpoilerFrame {
            simulation_time: self.simulation_time,
            autopilot_engaged: registry.read_bool(vars::AUTOPILOT_ENGAGED).unwrap_or(false),
            ground_speed: registry.read_or(vars::GROUND_SPEED, 0.0),
            thrust_lever_angles: [
                registry.read_or(vars::THROTTLE_1_TLA, 0.0),
                registry.read_or(vars::THROTTLE_2_TLA, 0.0),
            ],
            gear_compression: [
                gear_strut_compression_from_animation(
                    registry.read_or(vars::LEFT_GEAR_ANIMATION, 0.0),
                ),
                gear_strut_compression_from_animation(
                    registry.read_or(vars::RIGHT_GEAR_ANIMATION, 0.0),
                ),
            ],
            flaps_handle_index: flaps_index(registry.read_or(vars::FLAPS_HANDLE_INDEX, 0.0)),
            aoa_protection_active: registry
                .read_bool(vars::AOA_PROTECTION_ACTIVE)
                .unwrap_or(false),
            request: self.spoilers.request(),
        };

        let spoilers = self.spoilers.update(&frame);
        self.ailerons.update(
            spoilers.ground_spoilers_active,
            registry.read_or(vars::FLAPS_POSITION, 0.0),
            registry.read_or(vars::ROLL_COMMAND, 0.0),
            dt,
        );
        let rudder_trim = self.rudder_trim.update(dt);

        let outputs = FrameOutputs {
            simulation_time: self.simulation_time,
            spoilers,
            aileron_left: self.ailerons.left_position(),
            aileron_right: self.ailerons.right_position(),
            elevator_trim: self.elevator_trim.position(),
            rudder_trim,
        };
        write_outputs(registry, &outputs);
        outputs
    }

    fn start<R>(&mut self, registry: &R)
    where
        R: VariableRegistry + ?Sized,
    {
        if let Some(v) = registry.read(vars::ELEVATOR_TRIM_POSITION) {
            self.elevator_trim.synchronize(v);
        }
        if let Some(v) = registry.read(vars::RUDDER_TRIM_POSITION) {
            self.rudder_trim.synchronize(v);
        }
        let armed = registry.read_bool(vars::SPOILERS_ARMED).unwrap_or(false);
        let handle = clamp_unit(registry.read_or(vars::SPOILERS_HANDLE_POSITION, 0.0));
        self.spoilers.initialize(armed, handle);
        self.started = true;
        debug!(
            armed,
            handle,
            elevator_trim = self.elevator_trim.target(),
            rudder_trim = self.rudder_trim.target(),
            "session started"
        );
    }

    fn apply_trim_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ElevatorTrimUp => self.elevator_trim.on_increment(),
            HostEvent::ElevatorTrimDown => self.elevator_trim.on_decrement(),
            HostEvent::ElevatorTrimSet(raw) => self.elevator_trim.on_set_absolute(raw),
            HostEvent::RudderTrimLeft => self.rudder_trim.on_decrement(),
            HostEvent::RudderTrimRight => self.rudder_trim.on_increment(),
            HostEvent::RudderTrimSet(raw) => self.rudder_trim.on_set_absolute(raw),
            HostEvent::RudderTrimReset => self.rudder_trim.on_reset(),
            _ => {}
        }
    }
}

fn flaps_index(value: f64) -> u8 {
    // saturating cast, NaN maps to 0
    value.round() as u8
}

fn write_outputs<R>(registry: &mut R, out: &FrameOutputs)
where
    R: VariableRegistry + ?Sized,
{
    registry.write_bool(vars::SPOILERS_ARMED, out.spoilers.armed);
    registry.write(vars::SPOILERS_HANDLE_POSITION, out.spoilers.handle_position);
    registry.write(vars::SPOILERS_SIM_POSITION, out.spoilers.sim_position);
    registry.write_bool(vars::GROUND_SPOILERS_ACTIVE, out.spoilers.ground_spoilers_active);
    registry.write(vars::AILERON_LEFT_POSITION, out.aileron_left);
    registry.write(vars::AILERON_RIGHT_POSITION, out.aileron_right);
    registry.write(vars::ELEVATOR_TRIM_POSITION, out.elevator_trim);
    registry.write(vars::RUDDER_TRIM_POSITION, out.rudder_trim);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;
    use sfc_core::units::s;
    use sfc_surfaces::SpoilerCommand;

    fn session() -> Session {
        Session::new(&ControlsConfig::default()).unwrap()
    }

    #[test]
    fn first_frame_adopts_registry_state() {
        let mut reg = MemoryRegistry::new();
        reg.write(vars::ELEVATOR_TRIM_POSITION, 2.5);
        reg.write(vars::RUDDER_TRIM_POSITION, -0.3);
        reg.write(vars::SPOILERS_HANDLE_POSITION, 0.5);

        let mut session = session();
        let out = session.step(&mut reg, s(0.0));
        assert_eq!(out.elevator_trim, 2.5);
        assert_eq!(out.rudder_trim, -0.3);
        assert_eq!(out.spoilers.handle_position, 0.5);
        assert!(!out.spoilers.armed);
    }

    #[test]
    fn later_registry_changes_do_not_resync() {
        let mut reg = MemoryRegistry::new();
        let mut session = session();
        session.step(&mut reg, s(0.1));
        reg.write(vars::ELEVATOR_TRIM_POSITION, 5.0);
        let out = session.step(&mut reg, s(0.1));
        assert_eq!(out.elevator_trim, 0.0);
        assert_eq!(reg.read(vars::ELEVATOR_TRIM_POSITION), Some(0.0));
    }

    #[test]
    fn events_apply_in_order() {
        let mut reg = MemoryRegistry::new();
        let mut session = session();
        session.queue_event(SpoilerCommand::ArmOn.into());
        session.queue_event(HostEvent::SpoilersSet(8192.0));
        session.queue_event(HostEvent::ElevatorTrimUp);
        session.queue_event(HostEvent::ElevatorTrimUp);
        assert_eq!(session.pending_events(), 4);

        let out = session.step(&mut reg, s(0.1));
        assert_eq!(session.pending_events(), 0);
        assert_eq!(out.spoilers.handle_position, 0.5);
        assert!(!out.spoilers.armed);
        assert!((out.elevator_trim - 0.2).abs() < 1e-12);
        assert_eq!(reg.read(vars::SPOILERS_SIM_POSITION), Some(0.5));
    }

    #[test]
    fn invalid_dt_does_not_advance_time() {
        let mut reg = MemoryRegistry::new();
        let mut session = session();
        session.step(&mut reg, s(0.5));
        session.step(&mut reg, s(f64::NAN));
        session.step(&mut reg, s(-1.0));
        assert_eq!(session.simulation_time(), 0.5);
    }

    #[test]
    fn flaps_index_saturates() {
        assert_eq!(flaps_index(f64::NAN), 0);
        assert_eq!(flaps_index(-2.0), 0);
        assert_eq!(flaps_index(4.6), 5);
        assert_eq!(flaps_index(1e9), u8::MAX);
    }
}
