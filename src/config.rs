//! Simulation configuration parameters
//!
//! All tunable parameters for the HVAC simulation core.
//! Defaults reproduce the reference house; a JSON file can override them.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::control::fan::FanSpeedTable;
use crate::control::thermal::{HeatTierTable, ThermalModel};
use crate::error::{Error, Result};
use crate::zones::ZONE_COUNT;

/// Core simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // --- Thermal model ---
    /// Heat-loss coefficient U
    pub heat_loss_coefficient: f64,
    /// Thermal capacitance C
    pub thermal_capacitance: f64,
    /// Heat output per temperature-difference tier
    pub heat_tiers: HeatTierTable,

    // --- Timing ---
    /// Actuator step interval dt (milliseconds of wall time per step)
    pub step_interval_ms: u64,
    /// Poller fan-out interval (milliseconds)
    pub poll_interval_ms: u64,
    /// Steps after which a cycle that has not crossed the setpoint faults
    pub max_iterations: u32,

    // --- Air handler ---
    pub fan_speeds: FanSpeedTable,
    /// Nominal airflow (cfm)
    pub airflow_cfm: u16,
    pub dampers: DamperDefaults,

    // --- Session start ---
    pub initial: InitialState,
}

/// Damper positions applied at start-up, in percent.
///
/// Out-of-range values are accepted here and surface as the Fault sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamperDefaults {
    pub supply: i32,
    pub return_air: i32,
    pub outdoor_air: i32,
    /// One entry per zone, in system-overview order
    pub zones: [i32; ZONE_COUNT],
}

impl Default for DamperDefaults {
    fn default() -> Self {
        Self {
            supply: 100,
            return_air: 80,
            outdoor_air: 20,
            zones: [100; ZONE_COUNT],
        }
    }
}

/// Values shown before the first control request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub setpoint: f64,
    pub indoor_temp: f64,
    pub outdoor_temp: f64,
    pub date: String,
    pub time: String,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            setpoint: 22.0,
            indoor_temp: 22.0,
            outdoor_temp: 27.0,
            date: "2024-01-01".into(),
            time: "12:00".into(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Thermal model
            heat_loss_coefficient: 10.0,
            thermal_capacitance: 500.0,
            heat_tiers: HeatTierTable::default(),

            // Timing
            step_interval_ms: 2000, // one step per 2 s
            poll_interval_ms: 100,  // 10 Hz fan-out
            max_iterations: 5000,

            // Air handler
            fan_speeds: FanSpeedTable::default(),
            airflow_cfm: 300,
            dampers: DamperDefaults::default(),

            initial: InitialState::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject parameter sets the thermal model or the task timing cannot run.
    pub fn validate(&self) -> Result<()> {
        if !self.heat_loss_coefficient.is_finite() || self.heat_loss_coefficient < 0.0 {
            return Err(Error::Config("heat-loss coefficient must be finite and >= 0"));
        }
        if !self.thermal_capacitance.is_finite() || self.thermal_capacitance <= 0.0 {
            return Err(Error::Config("thermal capacitance must be finite and > 0"));
        }
        if !self.heat_tiers.is_well_formed() {
            return Err(Error::Config(
                "heat tiers must be non-empty, finite and sorted by descending threshold",
            ));
        }
        if self.step_interval_ms == 0 || self.poll_interval_ms == 0 {
            return Err(Error::Config("step and poll intervals must be non-zero"));
        }
        if self.max_iterations == 0 {
            return Err(Error::Config("max_iterations must be non-zero"));
        }
        if !self.initial.setpoint.is_finite()
            || !self.initial.indoor_temp.is_finite()
            || !self.initial.outdoor_temp.is_finite()
        {
            return Err(Error::Config("initial temperatures must be finite"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing simulation config")?;
        config.validate()?;
        Ok(config)
    }

    /// Thermal model built from these parameters.
    pub fn thermal_model(&self) -> ThermalModel {
        ThermalModel::new(
            self.heat_loss_coefficient,
            self.thermal_capacitance,
            self.heat_tiers.clone(),
        )
    }

    /// Wall time a cycle runs before the iteration bound faults it (milliseconds).
    pub fn cycle_timeout_ms(&self) -> u64 {
        self.step_interval_ms.saturating_mul(u64::from(self.max_iterations))
    }
}
