//! Registry variable names read and written by a session.

// sensors
pub const AUTOPILOT_ENGAGED: &str = "autopilot_engaged";
/// Knots.
pub const GROUND_SPEED: &str = "ground_speed";
/// Degrees.
pub const THROTTLE_1_TLA: &str = "throttle_1_tla";
pub const THROTTLE_2_TLA: &str = "throttle_2_tla";
/// Gear animation position, `0.5` at full extension, `1.0` fully compressed.
pub const LEFT_GEAR_ANIMATION: &str = "left_gear_animation";
pub const RIGHT_GEAR_ANIMATION: &str = "right_gear_animation";
pub const FLAPS_HANDLE_INDEX: &str = "flaps_handle_index";
/// Degrees.
pub const FLAPS_POSITION: &str = "flaps_position";
pub const AOA_PROTECTION_ACTIVE: &str = "aoa_protection_active";
pub const ROLL_COMMAND: &str = "roll_command";

// read once on the first frame, written every frame
pub const SPOILERS_ARMED: &str = "spoilers_armed";
pub const SPOILERS_HANDLE_POSITION: &str = "spoilers_handle_position";
pub const ELEVATOR_TRIM_POSITION: &str = "elevator_trim_position";
pub const RUDDER_TRIM_POSITION: &str = "rudder_trim_position";

// outputs
pub const SPOILERS_SIM_POSITION: &str = "spoilers_sim_position";
pub const GROUND_SPOILERS_ACTIVE: &str = "ground_spoilers_active";
pub const AILERON_LEFT_POSITION: &str = "aileron_left_position";
pub const AILERON_RIGHT_POSITION: &str = "aileron_right_position";
