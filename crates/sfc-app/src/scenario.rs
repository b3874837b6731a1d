//! Scripted frame sequences replayed through a [`Session`].

use serde::{Deserialize, Serialize};
use sfc_config::ControlsConfig;
use sfc_core::units::s;
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::events::HostEvent;
use crate::registry::MemoryRegistry;
use crate::session::{FrameOutputs, Session};

/// Registry values present before the first frame, followed by the frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub initial: MemoryRegistry,
    #[serde(default)]
    pub frames: Vec<ScenarioFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFrame {
    /// Seconds.
    pub dt: f64,
    /// Sensor values changed before this frame; others keep their last value.
    #[serde(default)]
    pub variables: MemoryRegistry,
    /// Events queued before the first repetition.
    #[serde(default)]
    pub events: Vec<HostEvent>,
    /// Number of identical frames to run.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

fn default_repeat() -> usize {
    1
}

impl Scenario {
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> AppResult<()> {
        for (index, frame) in self.frames.iter().enumerate() {
            if !(frame.dt.is_finite() && frame.dt >= 0.0) {
                return Err(AppError::InvalidFrame {
                    index,
                    reason: format!("dt must be finite and non-negative, got {}", frame.dt),
                });
            }
            if frame.repeat == 0 {
                return Err(AppError::InvalidFrame {
                    index,
                    reason: "repeat must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Total number of session steps the scenario expands to.
    pub fn step_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat).sum()
    }

    /// Run every frame through a fresh session.
    pub fn replay(&self, controls: &ControlsConfig) -> AppResult<Vec<FrameOutputs>> {
        self.validate()?;
        let mut session = Session::new(controls)?;
        let mut registry = self.initial.clone();
        let mut outputs = Vec::with_capacity(self.step_count());

        for frame in &self.frames {
            registry.merge(&frame.variables);
            for event in &frame.events {
                session.queue_event(*event);
            }
            for _ in 0..frame.repeat {
                outputs.push(session.step(&mut registry, s(frame.dt)));
            }
        }
        debug!(steps = outputs.len(), "scenario replayed");
        Ok(outputs)
    }
}

pub const CSV_HEADER: &str = "time_s,spoilers_armed,spoilers_handle,spoilers_sim,ground_spoilers_active,aileron_left,aileron_right,elevator_trim,rudder_trim";

pub fn outputs_to_csv(outputs: &[FrameOutputs]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for o in outputs {
        csv.push_str(&format!(
            "{:.3},{},{},{},{},{},{},{},{}\n",
            o.simulation_time,
            u8::from(o.spoilers.armed),
            o.spoilers.handle_position,
            o.spoilers.sim_position,
            u8::from(o.spoilers.ground_spoilers_active),
            o.aileron_left,
            o.aileron_right,
            o.elevator_trim,
            o.rudder_trim,
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_default_to_one_repeat() {
        let scenario = Scenario::from_yaml_str("frames:\n  - dt: 0.1\n  - dt: 0.2\n    repeat: 3\n")
            .unwrap();
        assert_eq!(scenario.step_count(), 4);
        assert!(scenario.initial.is_empty());
    }

    #[test]
    fn bad_frames_are_rejected() {
        let err = Scenario::from_yaml_str("frames:\n  - dt: 0.1\n  - dt: -1.0\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidFrame { index: 1, .. }));

        let err = Scenario::from_yaml_str("frames:\n  - dt: 0.1\n    repeat: 0\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidFrame { index: 0, .. }));

        assert!(matches!(
            Scenario::from_yaml_str("frames: 3"),
            Err(AppError::Scenario(_))
        ));
    }

    #[test]
    fn csv_has_one_row_per_step() {
        let scenario = Scenario::from_yaml_str("frames:\n  - dt: 0.5\n    repeat: 2\n").unwrap();
        let outputs = scenario.replay(&ControlsConfig::default()).unwrap();
        let csv = outputs_to_csv(&outputs);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[2].starts_with("1.000,0,0,0,0,"));
    }
}
