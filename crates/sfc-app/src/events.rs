//! Discrete cockpit events queued by the host between frames.

use serde::{Deserialize, Serialize};
use sfc_surfaces::SpoilerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HostEvent {
    SpoilersOn,
    SpoilersOff,
    SpoilersToggle,
    SpoilersSet(f64),
    SpoilersAxisSet(f64),
    SpoilersArmOn,
    SpoilersArmOff,
    SpoilersArmToggle,
    SpoilersArmSet(bool),
    ElevatorTrimUp,
    ElevatorTrimDown,
    ElevatorTrimSet(f64),
    RudderTrimLeft,
    RudderTrimRight,
    RudderTrimSet(f64),
    RudderTrimReset,
}

impl HostEvent {
    /// The spoiler command this event carries, if any.
    pub fn spoiler_command(self) -> Option<SpoilerCommand> {
        let cmd = match self {
            HostEvent::SpoilersOn => SpoilerCommand::On,
            HostEvent::SpoilersOff => SpoilerCommand::Off,
            HostEvent::SpoilersToggle => SpoilerCommand::Toggle,
            HostEvent::SpoilersSet(raw) => SpoilerCommand::Set(raw),
            HostEvent::SpoilersAxisSet(raw) => SpoilerCommand::AxisSet(raw),
            HostEvent::SpoilersArmOn => SpoilerCommand::ArmOn,
            HostEvent::SpoilersArmOff => SpoilerCommand::ArmOff,
            HostEvent::SpoilersArmToggle => SpoilerCommand::ArmToggle,
            HostEvent::SpoilersArmSet(v) => SpoilerCommand::ArmSet(v),
            _ => return None,
        };
        Some(cmd)
    }
}

impl From<SpoilerCommand> for HostEvent {
    fn from(cmd: SpoilerCommand) -> Self {
        match cmd {
            SpoilerCommand::On => HostEvent::SpoilersOn,
            SpoilerCommand::Off => HostEvent::SpoilersOff,
            SpoilerCommand::Toggle => HostEvent::SpoilersToggle,
            SpoilerCommand::Set(raw) => HostEvent::SpoilersSet(raw),
            SpoilerCommand::AxisSet(raw) => HostEvent::SpoilersAxisSet(raw),
            SpoilerCommand::ArmOn => HostEvent::SpoilersArmOn,
            SpoilerCommand::ArmOff => HostEvent::SpoilersArmOff,
            SpoilerCommand::ArmToggle => HostEvent::SpoilersArmToggle,
            SpoilerCommand::ArmSet(v) => HostEvent::SpoilersArmSet(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_events_carry_no_spoiler_command() {
        assert_eq!(HostEvent::RudderTrimReset.spoiler_command(), None);
        assert_eq!(
            HostEvent::SpoilersSet(100.0).spoiler_command(),
            Some(SpoilerCommand::Set(100.0))
        );
        assert_eq!(
            HostEvent::from(SpoilerCommand::ArmSet(true)),
            HostEvent::SpoilersArmSet(true)
        );
    }

    #[test]
    fn yaml_shape() {
        let events: Vec<HostEvent> =
            serde_yaml::from_str("- type: spoilers_arm_on\n- type: rudder_trim_set\n  value: -8192\n")
                .unwrap();
        assert_eq!(
            events,
            vec![HostEvent::SpoilersArmOn, HostEvent::RudderTrimSet(-8192.0)]
        );
    }
}
