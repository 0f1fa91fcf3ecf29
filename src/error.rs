//! Unified error types for the HVAC control core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! controller's error handling uniform.  Variants carry plain data so they
//! can be cloned into cycle reports and compared in tests.

use core::fmt;

use crate::control::mode::Mode;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No outdoor record matches the requested date and hour.
    OutdoorLookup(LookupError),
    /// The fan-speed table has no entry for the decided mode.
    InvalidMode(Mode),
    /// The actuator did not cross the setpoint within its iteration bound.
    NonConvergence(ConvergenceFault),
    /// A request field was malformed (date, time or setpoint).
    Input(InputError),
    /// The cycle was superseded or explicitly cancelled before converging.
    Cancelled,
    /// The cycle worker thread could not be created.
    TaskSpawn,
    /// The cycle worker thread panicked before reporting an outcome.
    WorkerPanicked,
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutdoorLookup(e) => write!(f, "outdoor lookup: {e}"),
            Self::InvalidMode(mode) => write!(f, "no fan speed defined for {mode}"),
            Self::NonConvergence(e) => write!(f, "non-convergence: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Cancelled => write!(f, "cycle cancelled"),
            Self::TaskSpawn => write!(f, "cycle worker could not be spawned"),
            Self::WorkerPanicked => write!(f, "cycle worker panicked"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Outdoor lookup
// ---------------------------------------------------------------------------

/// No row in the outdoor series carries the formatted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// The exact `"YYYY-MM-DD H:00"` key that was searched for.
    pub key: String,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no outdoor record for '{}'", self.key)
    }
}

impl From<LookupError> for Error {
    fn from(e: LookupError) -> Self {
        Self::OutdoorLookup(e)
    }
}

// ---------------------------------------------------------------------------
// Convergence
// ---------------------------------------------------------------------------

/// Where the actuator gave up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceFault {
    /// Steps taken before the bound tripped.
    pub iterations: u32,
    /// Last simulated temperature (°C).
    pub last_temp: f64,
}

impl fmt::Display for ConvergenceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "setpoint not crossed after {} steps (last {:.2}\u{00b0}C)",
            self.iterations, self.last_temp
        )
    }
}

impl From<ConvergenceFault> for Error {
    fn from(e: ConvergenceFault) -> Self {
        Self::NonConvergence(e)
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Date is not a real calendar date in `YYYY-MM-DD` form.
    Date,
    /// Time is not `H:MM` with hour 0-23 and minute 0-59.
    Time,
    /// Setpoint is NaN or infinite.
    Setpoint,
    /// The outdoor source returned a NaN or infinite temperature.
    OutdoorReading,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "malformed date, expected YYYY-MM-DD"),
            Self::Time => write!(f, "malformed time, expected H:MM"),
            Self::Setpoint => write!(f, "setpoint must be a finite temperature"),
            Self::OutdoorReading => write!(f, "outdoor temperature is not finite"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
