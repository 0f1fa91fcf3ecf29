//! Operating-mode decision.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Operating regime chosen once per control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Heating,
    Cooling,
    Normal,
}

impl Mode {
    /// Map a setpoint and outdoor reading to a mode.
    ///
    /// A setpoint above the outdoor temperature heats, below it cools,
    /// equal leaves the plant idle.  Unordered inputs (NaN) fall through to
    /// `Normal` so no actuator is ever started on a meaningless comparison.
    pub fn decide(setpoint: f64, outdoor: f64) -> Self {
        if setpoint > outdoor {
            Self::Heating
        } else if setpoint < outdoor {
            Self::Cooling
        } else {
            Self::Normal
        }
    }

    /// Whether this mode drives an actuator.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heating => "Heating mode",
            Self::Cooling => "Cooling mode",
            Self::Normal => "Normal mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
