//! Integration tests for `AppCommand` dispatch and date/time editing.

use super::mock_ports::{RecordingSink, controller, slow_config};

use zonehvac::app::commands::AppCommand;
use zonehvac::app::events::AppEvent;
use zonehvac::config::SimulationConfig;
use zonehvac::control::mode::Mode;
use zonehvac::error::{Error, InputError};
use zonehvac::tasks::channels::CyclePhase;
use zonehvac::tasks::tick::{InstantClock, ReactorClock};

#[test]
fn start_cycle_command_runs_a_cycle() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.handle_command(
        AppCommand::StartCycle {
            setpoint: 25.0,
            date: "2024-01-01".into(),
            time: "0:00".into(),
        },
        &mut sink,
    )
    .unwrap();

    assert_eq!(c.mode(), Mode::Heating);
    assert!(c.wait_for_cycle(&mut sink).unwrap().outcome.is_ok());
}

#[test]
fn set_date_time_then_retarget_uses_new_slot() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();

    c.handle_command(
        AppCommand::SetDateTime {
            date: "2024-1-2".into(),
            time: "7:30".into(),
        },
        &mut sink,
    )
    .unwrap();
    let s = c.settings_view();
    assert_eq!(s.date, "2024-01-02");
    assert_eq!(s.time, "7:30");
    assert_eq!(c.cycle_phase(), CyclePhase::Idle);

    c.handle_command(AppCommand::Retarget(21.0), &mut sink).unwrap();
    assert_eq!(c.system_overview().outdoor_temp, 5.0);
    assert_eq!(c.mode(), Mode::Heating);
    assert_eq!(c.setpoint(), 21.0);
    c.wait_for_cycle(&mut sink).unwrap();
}

#[test]
fn bad_set_date_time_is_rejected_and_reported() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();
    let before = c.settings_view();

    let err = c
        .handle_command(
            AppCommand::SetDateTime {
                date: "2024-13-01".into(),
                time: "7:00".into(),
            },
            &mut sink,
        )
        .unwrap_err();

    assert_eq!(err, Error::Input(InputError::Date));
    assert_eq!(c.settings_view(), before);
    assert!(matches!(sink.last(), Some(AppEvent::RequestRejected(_))));
}

#[test]
fn retarget_without_data_for_default_slot_fails() {
    // The initial slot is 2024-01-01 12:00, which the fixture lacks.
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let err = c.retarget(25.0, &mut RecordingSink::new()).unwrap_err();
    assert!(matches!(err, Error::OutdoorLookup(_)));
}

#[test]
fn cancel_command_stops_the_cycle() {
    let mut c = controller(slow_config(), ReactorClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();

    c.handle_command(AppCommand::CancelCycle, &mut sink).unwrap();

    assert!(!c.is_cycle_active());
    assert_eq!(c.cycle_phase(), CyclePhase::Cancelled);
    assert_eq!(
        c.last_report().map(|r| r.outcome.clone()),
        Some(Err(Error::Cancelled))
    );
}

#[test]
fn cancel_command_when_idle_is_ok() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    assert!(c
        .handle_command(AppCommand::CancelCycle, &mut RecordingSink::new())
        .is_ok());
}
