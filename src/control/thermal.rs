//! Discrete-time thermal model shared by the furnace and the air conditioner.
//!
//! One step moves the indoor temperature by
//!
//! ```text
//! heating:  T += (Q - U·(setpoint - T)) / C
//! cooling:  T -= (Q - U·(T - setpoint)) / C
//! ```
//!
//! where `Q` comes from a tiered lookup on `|setpoint - T|`.  The model is
//! pure: it never sleeps and never decides when to stop looping.

use core::fmt;

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// Maximum number of heat-output tiers.
pub const MAX_TIERS: usize = 8;

// ───────────────────────────────────────────────────────────────
// Appliances
// ───────────────────────────────────────────────────────────────

/// Which actuator a cycle is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appliance {
    Furnace,
    AirConditioner,
}

impl Appliance {
    /// The actuator a mode needs, `None` for `Normal`.
    pub fn for_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Heating => Some(Self::Furnace),
            Mode::Cooling => Some(Self::AirConditioner),
            Mode::Normal => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Furnace => "furnace",
            Self::AirConditioner => "aircon",
        }
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ───────────────────────────────────────────────────────────────
// Heat-output tiers
// ───────────────────────────────────────────────────────────────

/// `output` applies when the temperature difference is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatTier {
    pub above: f64,
    pub output: f64,
}

/// Tiers sorted by descending threshold; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeatTierTable(Vec<HeatTier, MAX_TIERS>);

impl HeatTierTable {
    /// Build a table from tiers already in descending threshold order.
    ///
    /// Returns `None` if more than [`MAX_TIERS`] are supplied.
    pub fn from_tiers(tiers: &[HeatTier]) -> Option<Self> {
        Vec::from_slice(tiers).ok().map(Self)
    }

    /// Heat output for a temperature difference.  Zero when no tier matches.
    pub fn output(&self, diff: f64) -> f64 {
        self.0
            .iter()
            .find(|tier| diff > tier.above)
            .map_or(0.0, |tier| tier.output)
    }

    pub fn tiers(&self) -> &[HeatTier] {
        &self.0
    }

    /// Thresholds strictly descending and every value finite.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .iter()
                .all(|t| t.above.is_finite() && t.output.is_finite() && t.output >= 0.0)
            && self.0.windows(2).all(|w| w[0].above > w[1].above)
    }
}

/// Stock furnace and air-conditioner tiers: >10 -> 500, >5 -> 300, >0 -> 100.
pub const DEFAULT_TIERS: [HeatTier; 3] = [
    HeatTier { above: 10.0, output: 500.0 },
    HeatTier { above: 5.0, output: 300.0 },
    HeatTier { above: 0.0, output: 100.0 },
];

const _: () = assert!(DEFAULT_TIERS.len() <= MAX_TIERS);

impl Default for HeatTierTable {
    fn default() -> Self {
        Self(DEFAULT_TIERS.into_iter().collect())
    }
}

// ───────────────────────────────────────────────────────────────
// Model
// ───────────────────────────────────────────────────────────────

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Temperature after the step (°C).
    pub temp: f64,
    /// Heat output used for the step.
    pub output: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermalModel {
    /// Heat-loss coefficient.
    pub u: f64,
    /// Thermal capacitance.
    pub c: f64,
    pub tiers: HeatTierTable,
}

impl ThermalModel {
    pub fn new(u: f64, c: f64, tiers: HeatTierTable) -> Self {
        Self { u, c, tiers }
    }

    /// Advance `current` by one step toward `setpoint`.
    pub fn step(&self, current: f64, setpoint: f64, appliance: Appliance) -> Step {
        let output = self.tiers.output((setpoint - current).abs());
        let temp = match appliance {
            Appliance::Furnace => current + (output - self.u * (setpoint - current)) / self.c,
            Appliance::AirConditioner => current - (output - self.u * (current - setpoint)) / self.c,
        };
        Step { temp, output }
    }

    /// Whether `current` has met or crossed `setpoint` in the direction of travel.
    pub fn reached(current: f64, setpoint: f64, appliance: Appliance) -> bool {
        match appliance {
            Appliance::Furnace => current >= setpoint,
            Appliance::AirConditioner => current <= setpoint,
        }
    }
}

impl Default for ThermalModel {
    fn default() -> Self {
        Self::new(10.0, 500.0, HeatTierTable::default())
    }
}
