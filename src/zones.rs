//! The nine tracked zones and their damper positions.
//!
//! Every zone currently receives the same whole-house temperature from the
//! poller; zones differ only in their damper setting.

use core::fmt;

use serde::{Serialize, Serializer};

/// Number of tracked zones.
pub const ZONE_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Bedroom1,
    Bedroom2,
    Bedroom3,
    Bath1,
    Bath2,
    Living,
    Kitchen,
    MechanicalRoom,
    RecRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Floor {
    Ground,
    Basement,
}

impl Zone {
    /// All zones, in system-overview order.  `Zone::index` is the position here.
    pub const ALL: [Zone; ZONE_COUNT] = [
        Zone::Bedroom1,
        Zone::Bedroom2,
        Zone::Bedroom3,
        Zone::Bath1,
        Zone::Bath2,
        Zone::Living,
        Zone::Kitchen,
        Zone::MechanicalRoom,
        Zone::RecRoom,
    ];

    pub const GROUND_FLOOR: [Zone; 5] = [
        Zone::Bedroom1,
        Zone::Bedroom2,
        Zone::Bath1,
        Zone::Living,
        Zone::Kitchen,
    ];

    pub const BASEMENT: [Zone; 4] = [
        Zone::Bedroom3,
        Zone::Bath2,
        Zone::MechanicalRoom,
        Zone::RecRoom,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn floor(self) -> Floor {
        match self {
            Zone::Bedroom1 | Zone::Bedroom2 | Zone::Bath1 | Zone::Living | Zone::Kitchen => {
                Floor::Ground
            }
            Zone::Bedroom3 | Zone::Bath2 | Zone::MechanicalRoom | Zone::RecRoom => Floor::Basement,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::Bedroom1 => "bedroom 1",
            Zone::Bedroom2 => "bedroom 2",
            Zone::Bedroom3 => "bedroom 3",
            Zone::Bath1 => "bath 1",
            Zone::Bath2 => "bath 2",
            Zone::Living => "living room",
            Zone::Kitchen => "kitchen",
            Zone::MechanicalRoom => "mechanical room",
            Zone::RecRoom => "rec room",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ───────────────────────────────────────────────────────────────
// Dampers
// ───────────────────────────────────────────────────────────────

/// Damper opening in percent, or the Fault sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamperPosition {
    Open(u8),
    Fault,
}

impl DamperPosition {
    /// Anything outside 0..=100 is reported as `Fault`.
    pub fn from_percent(percent: i32) -> Self {
        match u8::try_from(percent) {
            Ok(p) if p <= 100 => Self::Open(p),
            _ => Self::Fault,
        }
    }

    pub fn percent(self) -> Option<u8> {
        match self {
            Self::Open(p) => Some(p),
            Self::Fault => None,
        }
    }
}

impl fmt::Display for DamperPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(p) => write!(f, "{p}%"),
            Self::Fault => f.write_str("Fault"),
        }
    }
}

impl Serialize for DamperPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Open(p) => serializer.serialize_u8(*p),
            Self::Fault => serializer.serialize_str("Fault"),
        }
    }
}
