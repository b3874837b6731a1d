use super::{SpoilerConfig, SpoilerFrame};

/// Predicates derived from one frame's sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditions {
    /// Main gears with strut compression above the on-ground threshold.
    pub gears_on_ground: u8,
    pub at_or_below_idle: bool,
    pub below_climb: bool,
    pub above_mct: bool,
    pub one_reverse_other_idle: bool,
    pub one_reverse_other_below_mct: bool,
    /// At least one lever past the touch-and-go angle.
    pub touch_and_go_thrust: bool,
}

impl Conditions {
    pub fn evaluate(config: &SpoilerConfig, frame: &SpoilerFrame) -> Self {
        let tla = &config.thrust_lever_angles;
        let [t1, t2] = frame.thrust_lever_angles;

        let gears_on_ground = frame
            .gear_compression
            .iter()
            .filter(|&&c| c > config.gear_on_ground_compression)
            .count() as u8;

        Self {
            gears_on_ground,
            at_or_below_idle: t1 <= tla.idle && t2 <= tla.idle,
            below_climb: t1 < tla.climb && t2 < tla.climb,
            above_mct: t1 > tla.mct && t2 > tla.mct,
            one_reverse_other_idle: (t1 < tla.idle && t2 <= tla.idle)
                || (t2 < tla.idle && t1 <= tla.idle),
            one_reverse_other_below_mct: (t1 < tla.idle && t2 < tla.mct)
                || (t2 < tla.idle && t1 < tla.mct),
            touch_and_go_thrust: t1 > tla.touch_and_go || t2 > tla.touch_and_go,
        }
    }
}
