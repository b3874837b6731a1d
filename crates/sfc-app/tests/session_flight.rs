//! Whole-session runs through an in-memory registry.

use proptest::prelude::*;
use sfc_app::vars;
use sfc_app::*;
use sfc_config::ControlsConfig;
use sfc_core::units::s;
use std::path::Path;

const DT: f64 = 0.1;

struct Host {
    session: Session,
    registry: MemoryRegistry,
}

impl Host {
    fn new() -> Self {
        let mut registry = MemoryRegistry::new();
        registry.write(vars::LEFT_GEAR_ANIMATION, 1.0);
        registry.write(vars::RIGHT_GEAR_ANIMATION, 1.0);
        registry.write(vars::FLAPS_POSITION, 40.0);
        Self {
            session: Session::new(&ControlsConfig::default()).unwrap(),
            registry,
        }
    }

    fn set(&mut self, name: &str, value: f64) {
        self.registry.write(name, value);
    }

    fn gear(&mut self, animation: f64) {
        self.set(vars::LEFT_GEAR_ANIMATION, animation);
        self.set(vars::RIGHT_GEAR_ANIMATION, animation);
    }

    fn throttles(&mut self, tla: f64) {
        self.set(vars::THROTTLE_1_TLA, tla);
        self.set(vars::THROTTLE_2_TLA, tla);
    }

    fn run(&mut self, seconds: f64) -> FrameOutputs {
        let frames = (seconds / DT).round() as usize;
        let mut out = self.session.step(&mut self.registry, s(DT));
        for _ in 1..frames {
            out = self.session.step(&mut self.registry, s(DT));
        }
        out
    }
}

#[test]
fn flight_with_armed_landing() {
    let mut host = Host::new();
    host.session.queue_event(HostEvent::SpoilersArmOn);
    let out = host.run(DT);
    assert!(out.spoilers.armed);

    // takeoff roll and climb out
    host.throttles(30.0);
    host.set(vars::GROUND_SPEED, 140.0);
    let out = host.run(3.0);
    assert_eq!(out.spoilers.sim_position, 0.0);
    host.gear(0.5);
    host.run(10.0);

    // touchdown at idle
    host.throttles(0.0);
    host.gear(1.0);
    host.set(vars::GROUND_SPEED, 130.0);
    let out = host.run(DT);
    assert_eq!(out.spoilers.sim_position, 1.0);
    assert!(out.spoilers.ground_spoilers_active);
    assert_eq!(host.registry.read_bool(vars::GROUND_SPOILERS_ACTIVE), Some(true));

    let out = host.run(2.0);
    assert!((out.aileron_left - -0.24).abs() < 1e-12);
    assert!((out.aileron_right - 0.24).abs() < 1e-12);

    // rollout, then disarm
    host.set(vars::GROUND_SPEED, 40.0);
    host.run(1.0);
    host.session.queue_event(HostEvent::SpoilersArmOff);
    let out = host.run(DT);
    assert_eq!(out.spoilers.sim_position, 0.0);
    assert!(!out.spoilers.ground_spoilers_active);
    assert!(!out.spoilers.armed);
}

#[test]
fn spoiler_events_in_one_frame_each_apply() {
    let mut host = Host::new();
    host.set(vars::GROUND_SPEED, 100.0);
    host.session.queue_event(HostEvent::SpoilersArmOn);
    let out = host.run(DT);
    assert!(out.spoilers.ground_spoilers_active);
    assert_eq!(out.spoilers.sim_position, 1.0);

    // lever out and back in before the next frame
    host.session.queue_event(HostEvent::SpoilersOn);
    host.session.queue_event(HostEvent::SpoilersOff);
    let out = host.run(DT);
    assert!(!out.spoilers.ground_spoilers_active);
    assert!(!out.spoilers.armed);
    assert_eq!(out.spoilers.handle_position, 0.0);
    assert_eq!(out.spoilers.sim_position, 0.0);
    assert_eq!(host.registry.read_bool(vars::GROUND_SPOILERS_ACTIVE), Some(false));
}

#[test]
fn ailerons_droop_with_flaps_in_flight() {
    let mut host = Host::new();
    host.gear(0.5);
    let out = host.run(2.0);
    assert!((out.aileron_left - 0.2).abs() < 1e-12);
    assert!((out.aileron_right - -0.2).abs() < 1e-12);

    host.set(vars::ROLL_COMMAND, 0.5);
    let out = host.run(2.0);
    assert!((out.aileron_left - 0.7).abs() < 1e-12);
    assert!((out.aileron_right - 0.3).abs() < 1e-12);
}

#[test]
fn trim_events_reach_the_registry() {
    let mut host = Host::new();
    host.set(vars::RUDDER_TRIM_POSITION, 0.2);
    host.session.queue_event(HostEvent::ElevatorTrimSet(16384.0));
    host.session.queue_event(HostEvent::RudderTrimReset);
    let out = host.run(DT);
    assert_eq!(out.elevator_trim, 13.5);
    assert_eq!(host.registry.read(vars::ELEVATOR_TRIM_POSITION), Some(13.5));
    assert!(out.rudder_trim < 0.2);

    host.run(5.0);
    assert_eq!(host.registry.read(vars::RUDDER_TRIM_POSITION), Some(0.0));
}

#[test]
fn demo_scenario_replays() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let controls = sfc_config::load(&root.join("controls.yaml")).unwrap().controls;
    let scenario = Scenario::load_yaml(&root.join("rejected_takeoff.yaml")).unwrap();

    let outputs = scenario.replay(&controls).unwrap();
    assert_eq!(outputs.len(), scenario.step_count());

    let last = outputs.last().unwrap();
    assert_eq!(last.spoilers.sim_position, 1.0);
    assert!(last.spoilers.ground_spoilers_active);
    assert!(outputs.iter().any(|o| o.spoilers.armed));
}

proptest! {
    #[test]
    fn outputs_stay_bounded_under_any_frame_time(
        dts in prop::collection::vec(
            prop_oneof![
                4 => 0.0_f64..1.0,
                1 => Just(f64::NAN),
                1 => Just(-0.5),
                1 => Just(f64::INFINITY),
            ],
            1..80,
        ),
        handle in -2.0_f64..3.0,
    ) {
        let mut host = Host::new();
        host.set(vars::SPOILERS_HANDLE_POSITION, handle);
        host.set(vars::GROUND_SPEED, 100.0);
        host.session.queue_event(HostEvent::RudderTrimRight);

        let mut last_time = 0.0;
        for dt in dts {
            let out = host.session.step(&mut host.registry, s(dt));
            prop_assert!(out.simulation_time >= last_time);
            prop_assert!(out.simulation_time.is_finite());
            last_time = out.simulation_time;
            prop_assert!((0.0..=1.0).contains(&out.spoilers.handle_position));
            prop_assert!((0.0..=1.0).contains(&out.spoilers.sim_position));
            prop_assert!(out.aileron_left.abs() <= 1.0 && out.aileron_right.abs() <= 1.0);
            prop_assert!(out.rudder_trim.abs() <= 1.0);
        }
    }
}
