//! Fan-speed selection and the degraded-fan policy.
//!
//! [`select`] is the strict mapping: a mode with no table entry is an
//! [`Error::InvalidMode`].  [`FanPolicy::apply`] wraps it for the
//! controller, turning that error into "fan Off, previous speed kept"
//! instead of failing the whole request.

use core::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanSpeed {
    Low,
    Medium,
    High,
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanStatus {
    On,
    Off,
}

impl fmt::Display for FanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "On",
            Self::Off => "Off",
        })
    }
}

/// Fan speed per mode.  `None` marks a mode the air handler has no speed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanSpeedTable {
    pub heating: Option<FanSpeed>,
    pub cooling: Option<FanSpeed>,
    pub normal: Option<FanSpeed>,
}

impl Default for FanSpeedTable {
    fn default() -> Self {
        Self {
            heating: Some(FanSpeed::High),
            cooling: Some(FanSpeed::High),
            normal: Some(FanSpeed::Low),
        }
    }
}

/// Look up the fan speed for `mode`.
pub fn select(table: &FanSpeedTable, mode: Mode) -> Result<FanSpeed> {
    let entry = match mode {
        Mode::Heating => table.heating,
        Mode::Cooling => table.cooling,
        Mode::Normal => table.normal,
    };
    entry.ok_or(Error::InvalidMode(mode))
}

/// What the air handler is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanSetting {
    pub status: FanStatus,
    pub speed: FanSpeed,
}

impl Default for FanSetting {
    fn default() -> Self {
        Self {
            status: FanStatus::Off,
            speed: FanSpeed::Low,
        }
    }
}

/// Result of applying the fan policy for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FanDecision {
    pub setting: FanSetting,
    /// Set when the fan was forced Off because selection failed.
    pub degraded: Option<Error>,
}

/// Degraded-fan policy used by the controller.
pub struct FanPolicy;

impl FanPolicy {
    /// Turn the fan On at the selected speed, or Off (keeping `previous`
    /// speed) when the table has no entry for `mode`.
    pub fn apply(table: &FanSpeedTable, mode: Mode, previous: FanSetting) -> FanDecision {
        match select(table, mode) {
            Ok(speed) => FanDecision {
                setting: FanSetting {
                    status: FanStatus::On,
                    speed,
                },
                degraded: None,
            },
            Err(e) => {
                warn!("Fan: {e}, forcing fan Off");
                FanDecision {
                    setting: FanSetting {
                        status: FanStatus::Off,
                        speed: previous.speed,
                    },
                    degraded: Some(e),
                }
            }
        }
    }
}
