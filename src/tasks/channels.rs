//! Shared state between the cycle tasks and the snapshot accessors.
//!
//! Each value lives in a [`Published`] cell: a blocking `embassy-sync`
//! mutex around a `Cell` holding a `Copy` value.  Writers replace the whole
//! value inside one critical section, so readers never see a torn update.
//! The lock is held only for the copy, never across an await.

use core::cell::Cell;
use core::fmt;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use serde::Serialize;

use crate::control::thermal::Appliance;
use crate::zones::ZONE_COUNT;

// ───────────────────────────────────────────────────────────────
// Latest-value cell
// ───────────────────────────────────────────────────────────────

pub struct Published<T: Copy> {
    cell: Mutex<CriticalSectionRawMutex, Cell<T>>,
}

impl<T: Copy> Published<T> {
    pub const fn new(value: T) -> Self {
        Self {
            cell: Mutex::new(Cell::new(value)),
        }
    }

    /// Replace the current value.
    pub fn publish(&self, value: T) {
        self.cell.lock(|c| c.set(value));
    }

    /// Copy of the most recently published value.
    pub fn latest(&self) -> T {
        self.cell.lock(Cell::get)
    }

    /// Read-modify-write under a single critical section.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        self.cell.lock(|c| {
            let mut value = c.get();
            f(&mut value);
            c.set(value);
        });
    }
}

// ───────────────────────────────────────────────────────────────
// Plant values
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplianceStatus {
    Off,
    On,
    Fault,
}

impl fmt::Display for ApplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::Fault => "Fault",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplianceState {
    pub status: ApplianceStatus,
    /// Heat output of the last step.
    pub energy: f64,
}

impl ApplianceState {
    pub const OFF: Self = Self {
        status: ApplianceStatus::Off,
        energy: 0.0,
    };
}

/// Everything the actuator writes, published as one value so status and
/// temperature are always observed together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantReading {
    pub current_temp: f64,
    pub furnace: ApplianceState,
    pub aircon: ApplianceState,
}

impl PlantReading {
    pub fn idle(current_temp: f64) -> Self {
        Self {
            current_temp,
            furnace: ApplianceState::OFF,
            aircon: ApplianceState::OFF,
        }
    }

    pub fn appliance(&self, appliance: Appliance) -> &ApplianceState {
        match appliance {
            Appliance::Furnace => &self.furnace,
            Appliance::AirConditioner => &self.aircon,
        }
    }

    pub fn appliance_mut(&mut self, appliance: Appliance) -> &mut ApplianceState {
        match appliance {
            Appliance::Furnace => &mut self.furnace,
            Appliance::AirConditioner => &mut self.aircon,
        }
    }

    /// True when both actuators report On, which must never be observed.
    pub fn both_on(&self) -> bool {
        self.furnace.status == ApplianceStatus::On && self.aircon.status == ApplianceStatus::On
    }
}

/// Where the current (or most recent) cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CyclePhase {
    Idle,
    Running,
    Converged,
    Faulted,
    Cancelled,
}

impl CyclePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Faulted | Self::Cancelled)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Cells shared by the controller and every cycle it starts.
pub struct PlantChannels {
    pub reading: Published<PlantReading>,
    pub zones: Published<[f64; ZONE_COUNT]>,
    pub phase: Published<CyclePhase>,
}

impl PlantChannels {
    pub fn new(indoor_temp: f64) -> Self {
        Self {
            reading: Published::new(PlantReading::idle(indoor_temp)),
            zones: Published::new([indoor_temp; ZONE_COUNT]),
            phase: Published::new(CyclePhase::Idle),
        }
    }

    /// Copy the published whole-house temperature into every zone.
    pub fn fan_out(&self) -> f64 {
        let temp = self.reading.latest().current_temp;
        self.zones.publish([temp; ZONE_COUNT]);
        temp
    }
}

// ───────────────────────────────────────────────────────────────
// Per-cycle signals
// ───────────────────────────────────────────────────────────────

/// Fresh for every cycle so a stale signal can never leak into the next one.
pub struct CycleSignals {
    /// Actuator -> poller: the cycle is over.
    pub stop: Signal<CriticalSectionRawMutex, ()>,
    /// Controller -> actuator: abandon the cycle.
    pub cancel: Signal<CriticalSectionRawMutex, ()>,
}

impl CycleSignals {
    pub const fn new() -> Self {
        Self {
            stop: Signal::new(),
            cancel: Signal::new(),
        }
    }
}

impl Default for CycleSignals {
    fn default() -> Self {
        Self::new()
    }
}
