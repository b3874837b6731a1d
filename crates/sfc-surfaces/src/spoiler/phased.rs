//! Phase-aware ground spoiler logic.
//!
//! Within one frame the rules run in a fixed order and later rules overwrite
//! what earlier ones commanded:
//!
//! 1. inhibit window (full flaps, thrust above MCT, alpha protection)
//! 2. manual handle/arming change
//! 3. autopilot engagement clamp
//! 4. phase detection (landing, then takeoff)
//! 5. takeoff deployment
//! 6. landing deployment, ending with the touch-and-go retraction
//!
//! There is no priority table; the order above is the contract.

use super::{
    Conditions, GroundSpoilers, HANDLE_RETRACTED, SpoilerConfig, SpoilerFrame, SpoilerOutput,
    SpoilerRequest,
};
use sfc_core::clamp_unit;
use tracing::debug;

/// Inhibit window state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Inhibit {
    #[default]
    Clear,
    /// Triggered. `cooldown_since` is the simulation time from which the
    /// trigger has been absent with the handle retracted.
    Active { cooldown_since: Option<f64> },
}

impl Inhibit {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Landing-phase detection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LandingPhase {
    /// Not in a landing; airborne time not tracked.
    #[default]
    Ground,
    /// Both main gears off the ground since `since`.
    Airborne { since: f64 },
    Landing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhasedSpoilers {
    config: SpoilerConfig,
    initialized: bool,
    armed: bool,
    handle_position: f64,
    sim_position: f64,
    ground_spoilers_active: bool,
    inhibit: Inhibit,
    landing: LandingPhase,
    takeoff: bool,
    simulation_time: f64,
    autopilot_engaged: bool,
}

impl PhasedSpoilers {
    /// Build from an already validated configuration.
    pub fn new(config: SpoilerConfig) -> Self {
        let retracted = config.positions.retracted;
        Self {
            config,
            initialized: false,
            armed: false,
            handle_position: HANDLE_RETRACTED,
            sim_position: retracted,
            ground_spoilers_active: false,
            inhibit: Inhibit::Clear,
            landing: LandingPhase::Ground,
            takeoff: false,
            simulation_time: 0.0,
            autopilot_engaged: false,
        }
    }

    pub fn config(&self) -> &SpoilerConfig {
        &self.config
    }

    pub fn inhibit(&self) -> Inhibit {
        self.inhibit
    }

    pub fn is_inhibited(&self) -> bool {
        self.inhibit.is_active()
    }

    pub fn landing_phase(&self) -> LandingPhase {
        self.landing
    }

    pub fn in_landing_phase(&self) -> bool {
        self.landing == LandingPhase::Landing
    }

    pub fn in_takeoff_phase(&self) -> bool {
        self.takeoff
    }

    /// Simulation time of the last update.
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    fn deploy_full(&mut self) {
        if !self.ground_spoilers_active {
            debug!(time = self.simulation_time, "ground spoilers deployed");
        }
        self.sim_position = self.config.positions.full;
        self.ground_spoilers_active = true;
    }

    fn update_inhibit(&mut self, frame: &SpoilerFrame, c: &Conditions, handle_request: f64) {
        let retracted = self.config.positions.retracted;
        let triggered = frame.flaps_handle_index == self.config.flaps_full_index
            || c.above_mct
            || frame.aoa_protection_active;

        if triggered {
            if !self.inhibit.is_active() {
                debug!(time = self.simulation_time, "spoiler inhibit set");
                self.sim_position = retracted;
            }
            self.inhibit = Inhibit::Active {
                cooldown_since: None,
            };
            return;
        }

        let Inhibit::Active { cooldown_since } = self.inhibit else {
            return;
        };
        let now = self.simulation_time;
        self.inhibit = match cooldown_since {
            _ if handle_request != HANDLE_RETRACTED => Inhibit::Active {
                cooldown_since: None,
            },
            None => Inhibit::Active {
                cooldown_since: Some(now),
            },
            Some(since) if now - since >= self.config.inhibit_cooldown => {
                debug!(time = now, "spoiler inhibit cleared");
                Inhibit::Clear
            }
            Some(_) => self.inhibit,
        };
    }

    /// Actuator position commanded by the handle alone.
    fn handle_to_sim(&self, handle: f64, autopilot_engaged: bool) -> f64 {
        let positions = &self.config.positions;
        let sim = if autopilot_engaged {
            handle.min(positions.autopilot_limit)
        } else {
            handle
        };
        sim.max(positions.retracted)
    }

    /// Pilot change of arming or handle position. Unchanged requests are
    /// ignored.
    fn apply_manual(&mut self, armed: bool, handle: f64, autopilot_engaged: bool) {
        if armed == self.armed && handle == self.handle_position {
            return;
        }

        // arming is only possible with the lever retracted
        self.armed = armed && handle == HANDLE_RETRACTED;
        self.handle_position = handle;

        if !self.inhibit.is_active() || handle == HANDLE_RETRACTED {
            self.sim_position = self.handle_to_sim(handle, autopilot_engaged);
            self.ground_spoilers_active = false;
        }
    }

    fn update_phases(&mut self, frame: &SpoilerFrame, c: &Conditions) {
        let now = self.simulation_time;
        let threshold = self.config.ground_speed_threshold;
        let gs = frame.ground_speed;

        let landing = match self.landing {
            LandingPhase::Landing if c.gears_on_ground == 2 && gs < threshold => {
                LandingPhase::Ground
            }
            LandingPhase::Ground if c.gears_on_ground == 0 => LandingPhase::Airborne { since: now },
            // a long frame may span both the minimum airborne time and touchdown
            LandingPhase::Airborne { since } if now - since >= self.config.minimum_airborne_time => {
                LandingPhase::Landing
            }
            LandingPhase::Airborne { .. } if c.gears_on_ground > 0 => LandingPhase::Ground,
            unchanged => unchanged,
        };
        if (landing == LandingPhase::Landing) != (self.landing == LandingPhase::Landing) {
            debug!(time = now, landing = landing == LandingPhase::Landing, "landing phase");
        }
        self.landing = landing;

        let takeoff = if c.gears_on_ground == 2 && gs > threshold {
            true
        } else if gs < threshold || c.gears_on_ground == 0 {
            false
        } else {
            self.takeoff
        };
        if takeoff != self.takeoff {
            debug!(time = now, takeoff, "takeoff phase");
        }
        self.takeoff = takeoff;
    }

    fn apply_takeoff(&mut self, c: &Conditions) {
        if self.takeoff && ((self.armed && c.at_or_below_idle) || c.one_reverse_other_idle) {
            self.deploy_full();
        }
    }

    fn apply_landing(&mut self, c: &Conditions) {
        if self.landing != LandingPhase::Landing {
            return;
        }
        let positions = self.config.positions;
        let lever_retracted = self.handle_position == HANDLE_RETRACTED;

        if self.armed || !lever_retracted {
            if c.gears_on_ground == 2 {
                if c.at_or_below_idle || c.one_reverse_other_below_mct {
                    self.deploy_full();
                } else if self.armed && c.below_climb {
                    self.sim_position = positions.partial;
                }
            } else if c.gears_on_ground >= 1 && c.at_or_below_idle {
                self.sim_position = self.handle_position.max(positions.partial);
            }
        }

        // evaluated after the branch above and may overwrite it
        if !self.armed && lever_retracted && c.one_reverse_other_below_mct {
            if c.gears_on_ground == 2 {
                self.deploy_full();
            } else if c.gears_on_ground >= 1 {
                self.sim_position = positions.partial;
            }
        }

        if c.gears_on_ground > 0 && c.touch_and_go_thrust {
            if self.ground_spoilers_active {
                debug!(time = self.simulation_time, "touch and go, ground spoilers retracted");
            }
            self.sim_position = self.handle_position.max(positions.retracted);
            self.ground_spoilers_active = false;
        }
    }
}

impl GroundSpoilers for PhasedSpoilers {
    fn initialize(&mut self, armed: bool, handle_position: f64) {
        if self.initialized {
            return;
        }
        let handle = clamp_unit(handle_position);
        self.armed = armed && handle == HANDLE_RETRACTED;
        self.handle_position = handle;
        self.sim_position = handle.max(self.config.positions.retracted);
        self.ground_spoilers_active = false;
        self.initialized = true;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, request: SpoilerRequest) {
        let handle = clamp_unit(request.handle_position);
        self.apply_manual(request.armed, handle, self.autopilot_engaged);
    }

    fn update(&mut self, frame: &SpoilerFrame) -> SpoilerOutput {
        if frame.simulation_time.is_finite() {
            self.simulation_time = frame.simulation_time;
        }
        let handle_request = clamp_unit(frame.request.handle_position);
        let conditions = Conditions::evaluate(&self.config, frame);

        self.update_inhibit(frame, &conditions, handle_request);
        self.apply_manual(frame.request.armed, handle_request, frame.autopilot_engaged);

        if frame.autopilot_engaged && !self.autopilot_engaged {
            self.sim_position = self.handle_to_sim(self.handle_position, true);
        }
        self.autopilot_engaged = frame.autopilot_engaged;

        self.update_phases(frame, &conditions);
        self.apply_takeoff(&conditions);
        self.apply_landing(&conditions);

        self.sim_position = clamp_unit(self.sim_position);
        self.output()
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn handle_position(&self) -> f64 {
        self.handle_position
    }

    fn sim_position(&self) -> f64 {
        self.sim_position
    }

    fn ground_spoilers_active(&self) -> bool {
        self.ground_spoilers_active
    }
}
