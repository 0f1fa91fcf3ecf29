//! Read-only snapshot views for the presentation layer.
//!
//! Each view is a plain struct with fields in display order.  `values()`
//! flattens it to a fixed-size array in exactly that order, the shape the
//! screens index into.  All views serialize to JSON for the CLI.

use core::fmt;

use serde::Serialize;

use crate::control::fan::{FanSpeed, FanStatus};
use crate::control::mode::Mode;
use crate::tasks::channels::ApplianceStatus;
use crate::zones::DamperPosition;

/// One field of a flattened view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewValue {
    Number(f64),
    Text(String),
    Mode(Mode),
    Status(ApplianceStatus),
    Fan(FanStatus),
    Speed(FanSpeed),
    Damper(DamperPosition),
    Airflow(u16),
}

impl fmt::Display for ViewValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v:.2}"),
            Self::Text(s) => f.write_str(s),
            Self::Mode(m) => write!(f, "{m}"),
            Self::Status(s) => write!(f, "{s}"),
            Self::Fan(s) => write!(f, "{s}"),
            Self::Speed(s) => write!(f, "{s}"),
            Self::Damper(d) => write!(f, "{d}"),
            Self::Airflow(cfm) => write!(f, "{cfm} cfm"),
        }
    }
}

/// Temperature and damper of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneReading {
    pub temperature: f64,
    pub damper: DamperPosition,
}

// ───────────────────────────────────────────────────────────────
// System overview (21 fields)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemOverview {
    pub bedroom1_temp: f64,
    pub bedroom2_temp: f64,
    pub bedroom3_temp: f64,
    pub bath1_temp: f64,
    pub bath2_temp: f64,
    pub living_temp: f64,
    pub kitchen_temp: f64,
    pub mechanical_room_temp: f64,
    pub rec_room_temp: f64,
    pub outdoor_temp: f64,
    pub date: String,
    pub time: String,
    pub mode: Mode,
    pub furnace_status: ApplianceStatus,
    pub furnace_energy: f64,
    pub aircon_status: ApplianceStatus,
    pub aircon_energy: f64,
    pub fan_status: FanStatus,
    pub supply_damper: DamperPosition,
    pub return_damper: DamperPosition,
    pub outdoor_damper: DamperPosition,
}

impl SystemOverview {
    pub const FIELDS: usize = 21;

    pub fn values(&self) -> [ViewValue; Self::FIELDS] {
        use ViewValue::{Damper, Fan, Number, Status, Text};
        [
            Number(self.bedroom1_temp),
            Number(self.bedroom2_temp),
            Number(self.bedroom3_temp),
            Number(self.bath1_temp),
            Number(self.bath2_temp),
            Number(self.living_temp),
            Number(self.kitchen_temp),
            Number(self.mechanical_room_temp),
            Number(self.rec_room_temp),
            Number(self.outdoor_temp),
            Text(self.date.clone()),
            Text(self.time.clone()),
            ViewValue::Mode(self.mode),
            Status(self.furnace_status),
            Number(self.furnace_energy),
            Status(self.aircon_status),
            Number(self.aircon_energy),
            Fan(self.fan_status),
            Damper(self.supply_damper),
            Damper(self.return_damper),
            Damper(self.outdoor_damper),
        ]
    }
}

// ───────────────────────────────────────────────────────────────
// Mechanical room (11 fields)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanicalRoomView {
    pub furnace_status: ApplianceStatus,
    pub furnace_energy: f64,
    pub aircon_status: ApplianceStatus,
    pub aircon_energy: f64,
    pub fan_status: FanStatus,
    pub fan_speed: FanSpeed,
    pub airflow_cfm: u16,
    pub supply_damper: DamperPosition,
    pub return_damper: DamperPosition,
    pub outdoor_damper: DamperPosition,
    pub outdoor_temp: f64,
}

impl MechanicalRoomView {
    pub const FIELDS: usize = 11;

    pub fn values(&self) -> [ViewValue; Self::FIELDS] {
        use ViewValue::{Airflow, Damper, Fan, Number, Speed, Status};
        [
            Status(self.furnace_status),
            Number(self.furnace_energy),
            Status(self.aircon_status),
            Number(self.aircon_energy),
            Fan(self.fan_status),
            Speed(self.fan_speed),
            Airflow(self.airflow_cfm),
            Damper(self.supply_damper),
            Damper(self.return_damper),
            Damper(self.outdoor_damper),
            Number(self.outdoor_temp),
        ]
    }
}

// ───────────────────────────────────────────────────────────────
// Floors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundFloorView {
    pub bedroom1: ZoneReading,
    pub bedroom2: ZoneReading,
    pub bath1: ZoneReading,
    pub living: ZoneReading,
    pub kitchen: ZoneReading,
    pub setpoint: f64,
    pub outdoor_temp: f64,
}

impl GroundFloorView {
    pub const FIELDS: usize = 12;

    pub fn values(&self) -> [ViewValue; Self::FIELDS] {
        let [a, b, c, d, e] = [self.bedroom1, self.bedroom2, self.bath1, self.living, self.kitchen];
        let (n, dp) = (ViewValue::Number, ViewValue::Damper);
        [
            n(a.temperature),
            dp(a.damper),
            n(b.temperature),
            dp(b.damper),
            n(c.temperature),
            dp(c.damper),
            n(d.temperature),
            dp(d.damper),
            n(e.temperature),
            dp(e.damper),
            n(self.setpoint),
            n(self.outdoor_temp),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasementView {
    pub bedroom3: ZoneReading,
    pub bath2: ZoneReading,
    pub mechanical_room: ZoneReading,
    pub rec_room: ZoneReading,
    pub setpoint: f64,
    pub outdoor_temp: f64,
}

impl BasementView {
    pub const FIELDS: usize = 10;

    pub fn values(&self) -> [ViewValue; Self::FIELDS] {
        let [a, b, c, d] = [self.bedroom3, self.bath2, self.mechanical_room, self.rec_room];
        let (n, dp) = (ViewValue::Number, ViewValue::Damper);
        [
            n(a.temperature),
            dp(a.damper),
            n(b.temperature),
            dp(b.damper),
            n(c.temperature),
            dp(c.damper),
            n(d.temperature),
            dp(d.damper),
            n(self.setpoint),
            n(self.outdoor_temp),
        ]
    }
}

// ───────────────────────────────────────────────────────────────
// Settings (3 fields)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub date: String,
    pub time: String,
    pub mode: Mode,
}

impl SettingsView {
    pub const FIELDS: usize = 3;

    pub fn values(&self) -> [ViewValue; Self::FIELDS] {
        [
            ViewValue::Text(self.date.clone()),
            ViewValue::Text(self.time.clone()),
            ViewValue::Mode(self.mode),
        ]
    }
}
