//! Integration tests for `ControllerCore` request handling and cycles.

use super::mock_ports::{MemoryOutdoor, RecordingSink, controller, slow_config};

use zonehvac::app::events::AppEvent;
use zonehvac::app::service::ControllerCore;
use zonehvac::config::SimulationConfig;
use zonehvac::control::fan::{FanSpeed, FanSpeedTable, FanStatus};
use zonehvac::control::mode::Mode;
use zonehvac::control::thermal::{Appliance, HeatTier, HeatTierTable};
use zonehvac::error::{Error, InputError};
use zonehvac::tasks::channels::{ApplianceStatus, CyclePhase};
use zonehvac::tasks::tick::{InstantClock, ReactorClock};

// ── Heating / cooling / normal ────────────────────────────────

#[test]
fn heating_cycle_reaches_setpoint_in_every_zone() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    assert_eq!(c.mode(), Mode::Heating);

    let report = c.wait_for_cycle(&mut sink).unwrap();
    assert_eq!(report.appliance, Appliance::Furnace);
    assert!(report.outcome.is_ok());

    let o = c.system_overview();
    let zones = [
        o.bedroom1_temp,
        o.bedroom2_temp,
        o.bedroom3_temp,
        o.bath1_temp,
        o.bath2_temp,
        o.living_temp,
        o.kitchen_temp,
        o.mechanical_room_temp,
        o.rec_room_temp,
    ];
    assert!(zones.iter().all(|&t| t >= 25.0 && t == zones[0]));
    assert_eq!(o.furnace_status, ApplianceStatus::Off);
    assert_eq!(o.aircon_status, ApplianceStatus::Off);
    assert_eq!(o.outdoor_temp, 15.0);
    assert_eq!(c.cycle_phase(), CyclePhase::Converged);

    assert!(matches!(
        sink.events[0],
        AppEvent::CycleStarted {
            mode: Mode::Heating,
            appliance: Some(Appliance::Furnace),
            ..
        }
    ));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CycleFinished(_))), 1);
}

#[test]
fn cooling_cycle_reaches_setpoint() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(22.0, "2024-01-01", "1:00", &mut sink).unwrap();
    assert_eq!(c.mode(), Mode::Cooling);
    let report = c.wait_for_cycle(&mut sink).unwrap();

    assert_eq!(report.appliance, Appliance::AirConditioner);
    assert!(c.current_temperature() <= 22.0);
    assert_eq!(c.mechanical_room_view().aircon_status, ApplianceStatus::Off);
}

#[test]
fn normal_mode_starts_nothing() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(20.0, "2024-01-01", "2:00", &mut sink).unwrap();

    assert_eq!(c.mode(), Mode::Normal);
    assert!(!c.is_cycle_active());
    assert!(c.wait_for_cycle(&mut sink).is_none());
    assert_eq!(c.current_temperature(), 20.0);
    assert_eq!(c.cycle_phase(), CyclePhase::Idle);

    let m = c.mechanical_room_view();
    assert_eq!(m.fan_status, FanStatus::On);
    assert_eq!(m.fan_speed, FanSpeed::Low);
    assert!(matches!(
        sink.last(),
        Some(AppEvent::CycleStarted { appliance: None, .. })
    ));
}

#[test]
fn fan_runs_high_while_active_then_drops_to_low() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    assert_eq!(c.mechanical_room_view().fan_speed, FanSpeed::High);
    c.wait_for_cycle(&mut sink).unwrap();
    assert_eq!(c.mechanical_room_view().fan_speed, FanSpeed::Low);
}

// ── Rejected requests ─────────────────────────────────────────

#[test]
fn lookup_failure_leaves_previous_state() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    c.wait_for_cycle(&mut sink).unwrap();
    let before = c.system_overview();

    let err = c.start_cycle(18.0, "2024-01-01", "9:00", &mut sink).unwrap_err();
    assert!(matches!(err, Error::OutdoorLookup(ref e) if e.key == "2024-01-01 9:00"));

    assert_eq!(c.system_overview(), before);
    assert_eq!(c.mode(), Mode::Heating);
    assert_eq!(c.setpoint(), 25.0);
    assert!(matches!(sink.last(), Some(AppEvent::RequestRejected(Error::OutdoorLookup(_)))));
}

#[test]
fn lookup_failure_does_not_disturb_a_running_cycle() {
    let mut c = controller(slow_config(), ReactorClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();

    assert!(c.start_cycle(18.0, "2024-01-01", "9:00", &mut sink).is_err());
    assert!(c.is_cycle_active());
    assert_eq!(c.mechanical_room_view().furnace_status, ApplianceStatus::On);

    let report = c.cancel_cycle(&mut sink).unwrap();
    assert_eq!(report.outcome, Err(Error::Cancelled));
}

#[test]
fn malformed_inputs_fail_fast() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    assert_eq!(
        c.start_cycle(25.0, "01/01/2024", "0:00", &mut sink),
        Err(Error::Input(InputError::Date))
    );
    assert_eq!(
        c.start_cycle(25.0, "2024-01-01", "0", &mut sink),
        Err(Error::Input(InputError::Time))
    );
    assert_eq!(
        c.start_cycle(f64::NAN, "2024-01-01", "0:00", &mut sink),
        Err(Error::Input(InputError::Setpoint))
    );
    assert_eq!(c.outdoor().lookups.get(), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RequestRejected(_))), 3);
}

#[test]
fn non_finite_outdoor_reading_is_rejected() {
    let outdoor = MemoryOutdoor::new(&[("2024-01-01 0:00", f64::NAN), ("2024-01-01 1:00", f64::INFINITY)]);
    let mut c = ControllerCore::new(SimulationConfig::default(), outdoor, InstantClock).unwrap();
    let mut sink = RecordingSink::new();
    let before = c.system_overview();

    assert_eq!(
        c.start_cycle(22.0, "2024-01-01", "0:00", &mut sink),
        Err(Error::Input(InputError::OutdoorReading))
    );
    assert_eq!(
        c.start_cycle(22.0, "2024-01-01", "1:00", &mut sink),
        Err(Error::Input(InputError::OutdoorReading))
    );

    let after = c.system_overview();
    assert_eq!(after, before);
    assert!(after.outdoor_temp.is_finite());
    assert!(c.current_temperature().is_finite());
    assert!(!c.is_cycle_active());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RequestRejected(_))), 2);
}

// ── Supersede / cancel ────────────────────────────────────────

#[test]
fn new_request_supersedes_running_cycle() {
    let mut c = controller(slow_config(), ReactorClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    assert!(c.is_cycle_active());

    c.start_cycle(22.0, "2024-01-01", "1:00", &mut sink).unwrap();
    assert_eq!(c.mode(), Mode::Cooling);

    let o = c.system_overview();
    assert_eq!(o.furnace_status, ApplianceStatus::Off);
    assert_eq!(o.aircon_status, ApplianceStatus::On);
    let t = c.current_temperature();
    assert!(t <= 30.0 && t > 29.0);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::CycleSuperseded(Appliance::Furnace))),
        1
    );
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::CycleFinished(r) if r.appliance == Appliance::Furnace && r.outcome == Err(Error::Cancelled)
    )));

    let report = c.cancel_cycle(&mut sink).unwrap();
    assert_eq!(report.appliance, Appliance::AirConditioner);
    assert_eq!(c.cycle_phase(), CyclePhase::Cancelled);
}

#[test]
fn cancel_without_cycle_is_none() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    assert!(c.cancel_cycle(&mut RecordingSink::new()).is_none());
}

#[test]
fn reap_is_non_blocking() {
    let mut c = controller(slow_config(), ReactorClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();

    assert!(c.reap(&mut sink).is_none());
    assert!(c.is_cycle_active());
    c.cancel_cycle(&mut sink).unwrap();
    assert!(c.reap(&mut sink).is_none());
}

#[test]
fn reap_collects_a_finished_cycle() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();

    let report = loop {
        if let Some(r) = c.reap(&mut sink) {
            break r;
        }
        std::thread::yield_now();
    };
    assert!(report.outcome.is_ok());
    assert_eq!(c.last_report(), Some(&report));
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn weak_furnace_reports_non_convergence() {
    let config = SimulationConfig {
        heat_loss_coefficient: 100.0,
        heat_tiers: HeatTierTable::from_tiers(&[HeatTier { above: 0.0, output: 10.0 }]).unwrap(),
        max_iterations: 25,
        ..SimulationConfig::default()
    };
    let mut c = controller(config, InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    let report = c.wait_for_cycle(&mut sink).unwrap();

    assert!(matches!(report.outcome, Err(Error::NonConvergence(f)) if f.iterations == 25));
    assert_eq!(c.system_overview().furnace_status, ApplianceStatus::Fault);
    assert_eq!(c.cycle_phase(), CyclePhase::Faulted);
}

#[test]
fn fault_clears_on_next_request() {
    let config = SimulationConfig {
        heat_loss_coefficient: 100.0,
        heat_tiers: HeatTierTable::from_tiers(&[HeatTier { above: 0.0, output: 10.0 }]).unwrap(),
        max_iterations: 5,
        ..SimulationConfig::default()
    };
    let mut c = controller(config, InstantClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    c.wait_for_cycle(&mut sink).unwrap();

    c.start_cycle(20.0, "2024-01-01", "2:00", &mut sink).unwrap();
    assert_eq!(c.system_overview().furnace_status, ApplianceStatus::Off);
}

#[test]
fn missing_fan_entry_degrades_fan_but_runs_cycle() {
    let config = SimulationConfig {
        fan_speeds: FanSpeedTable {
            heating: None,
            ..FanSpeedTable::default()
        },
        ..SimulationConfig::default()
    };
    let mut c = controller(config, InstantClock);
    let mut sink = RecordingSink::new();

    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    assert_eq!(c.system_overview().fan_status, FanStatus::Off);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FanDegraded(Mode::Heating))), 1);

    let report = c.wait_for_cycle(&mut sink).unwrap();
    assert!(report.outcome.is_ok());
}

// ── Invariants ────────────────────────────────────────────────

#[test]
fn furnace_and_aircon_never_both_on() {
    let config = SimulationConfig {
        step_interval_ms: 1,
        poll_interval_ms: 1,
        ..SimulationConfig::default()
    };
    let mut c = controller(config, ReactorClock);
    let mut sink = RecordingSink::new();
    let requests = [("0:00", 25.0), ("1:00", 22.0), ("0:00", 40.0), ("1:00", 10.0)];

    for round in 0..8 {
        let (time, setpoint) = requests[round % requests.len()];
        c.start_cycle(setpoint, "2024-01-01", time, &mut sink).unwrap();
        for _ in 0..200 {
            let o = c.system_overview();
            assert!(
                !(o.furnace_status == ApplianceStatus::On && o.aircon_status == ApplianceStatus::On),
                "both actuators on in round {round}"
            );
        }
    }
    c.cancel_cycle(&mut sink);
}
