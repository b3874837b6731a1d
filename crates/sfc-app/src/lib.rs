//! sfc-app: host integration for the secondary flight controls.
//!
//! The host owns a [`VariableRegistry`] of named simulation variables and
//! calls [`Session::step`] once per frame. Discrete cockpit events are queued
//! with [`Session::queue_event`] and applied at the start of the next frame.
//! [`Scenario`] replays scripted frames through a session for offline runs.

pub mod error;
pub mod events;
pub mod registry;
pub mod scenario;
pub mod session;
pub mod vars;

pub use error::{AppError, AppResult};
pub use events::HostEvent;
pub use registry::{MemoryRegistry, VariableRegistry};
pub use scenario::{CSV_HEADER, Scenario, ScenarioFrame, outputs_to_csv};
pub use session::{FrameOutputs, Session};
