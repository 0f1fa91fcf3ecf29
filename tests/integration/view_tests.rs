//! Integration tests for the snapshot views' shape and field order.

use super::mock_ports::{RecordingSink, controller};

use zonehvac::app::views::{
    BasementView, GroundFloorView, MechanicalRoomView, SettingsView, SystemOverview, ViewValue,
};
use zonehvac::config::{DamperDefaults, SimulationConfig};
use zonehvac::control::fan::FanStatus;
use zonehvac::control::mode::Mode;
use zonehvac::tasks::channels::ApplianceStatus;
use zonehvac::tasks::tick::InstantClock;
use zonehvac::zones::{DamperPosition, ZONE_COUNT};

#[test]
fn overview_has_21_fields_in_order() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(25.0, "2024-01-01", "0:00", &mut sink).unwrap();
    c.wait_for_cycle(&mut sink).unwrap();

    let v = c.system_overview().values();
    assert_eq!(v.len(), SystemOverview::FIELDS);
    let temp = c.current_temperature();
    for value in &v[..9] {
        assert_eq!(*value, ViewValue::Number(temp));
    }
    assert_eq!(v[9], ViewValue::Number(15.0));
    assert_eq!(v[10], ViewValue::Text("2024-01-01".into()));
    assert_eq!(v[11], ViewValue::Text("0:00".into()));
    assert_eq!(v[12], ViewValue::Mode(Mode::Heating));
    assert_eq!(v[13], ViewValue::Status(ApplianceStatus::Off));
    assert_eq!(v[15], ViewValue::Status(ApplianceStatus::Off));
    assert_eq!(v[17], ViewValue::Fan(FanStatus::On));
    assert_eq!(v[18], ViewValue::Damper(DamperPosition::Open(100)));
    assert_eq!(v[19], ViewValue::Damper(DamperPosition::Open(80)));
    assert_eq!(v[20], ViewValue::Damper(DamperPosition::Open(20)));
}

#[test]
fn overview_is_idempotent_without_state_change() {
    let mut c = controller(SimulationConfig::default(), InstantClock);
    let mut sink = RecordingSink::new();
    c.start_cycle(22.0, "2024-01-01", "1:00", &mut sink).unwrap();
    c.wait_for_cycle(&mut sink).unwrap();

    assert_eq!(c.system_overview(), c.system_overview());
    assert_eq!(c.ground_floor_view(), c.ground_floor_view());
}

#[test]
fn floor_views_pair_temperature_and_damper() {
    let mut zones = [100; ZONE_COUNT];
    zones[0] = 40; // bedroom 1
    zones[2] = 250; // bedroom 3, out of range
    let config = SimulationConfig {
        dampers: DamperDefaults {
            zones,
            ..DamperDefaults::default()
        },
        ..SimulationConfig::default()
    };
    let c = controller(config, InstantClock);

    let g = c.ground_floor_view().values();
    assert_eq!(g.len(), GroundFloorView::FIELDS);
    assert_eq!(g[0], ViewValue::Number(22.0));
    assert_eq!(g[1], ViewValue::Damper(DamperPosition::Open(40)));
    assert_eq!(g[10], ViewValue::Number(22.0)); // setpoint
    assert_eq!(g[11], ViewValue::Number(27.0)); // outdoor

    let b = c.basement_view().values();
    assert_eq!(b.len(), BasementView::FIELDS);
    assert_eq!(b[1], ViewValue::Damper(DamperPosition::Fault));
    assert_eq!(b[3], ViewValue::Damper(DamperPosition::Open(100)));
}

#[test]
fn mechanical_and_settings_shapes() {
    let c = controller(SimulationConfig::default(), InstantClock);
    let m = c.mechanical_room_view().values();
    assert_eq!(m.len(), MechanicalRoomView::FIELDS);
    assert_eq!(m[6], ViewValue::Airflow(300));
    assert_eq!(m[10], ViewValue::Number(27.0));

    let s = c.settings_view().values();
    assert_eq!(s.len(), SettingsView::FIELDS);
    assert_eq!(s[2], ViewValue::Mode(Mode::Normal));
}

#[test]
fn overview_serializes_to_json() {
    let c = controller(SimulationConfig::default(), InstantClock);
    let json = serde_json::to_value(c.system_overview()).unwrap();
    assert_eq!(json["return_damper"], 80);
    assert_eq!(json["furnace_status"], "Off");
    assert_eq!(json["mode"], "Normal");
}
