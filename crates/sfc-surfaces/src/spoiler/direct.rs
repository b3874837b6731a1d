//! Direct handle-to-position spoilers, for installations without automatic
//! ground-spoiler deployment.

use super::{GroundSpoilers, HANDLE_RETRACTED, SpoilerFrame, SpoilerOutput, SpoilerRequest};
use sfc_core::clamp_unit;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectSpoilers {
    initialized: bool,
    armed: bool,
    handle_position: f64,
}

impl DirectSpoilers {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, armed: bool, handle_position: f64) {
        self.handle_position = clamp_unit(handle_position);
        // any extension disarms
        self.armed = armed && self.handle_position <= HANDLE_RETRACTED;
    }
}

impl GroundSpoilers for DirectSpoilers {
    fn initialize(&mut self, armed: bool, handle_position: f64) {
        if self.initialized {
            return;
        }
        self.apply(armed, handle_position);
        self.initialized = true;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, request: SpoilerRequest) {
        self.apply(request.armed, request.handle_position);
    }

    fn update(&mut self, frame: &SpoilerFrame) -> SpoilerOutput {
        self.apply(frame.request.armed, frame.request.handle_position);
        self.output()
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn handle_position(&self) -> f64 {
        self.handle_position
    }

    fn sim_position(&self) -> f64 {
        self.handle_position
    }

    fn ground_spoilers_active(&self) -> bool {
        false
    }
}
