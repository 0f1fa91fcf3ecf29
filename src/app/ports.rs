//! Port traits: the boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerCore (domain)
//! ```
//!
//! Driven adapters (outdoor data, event sinks) implement these traits.
//! The [`ControllerCore`](super::service::ControllerCore) consumes them via
//! generics and never reads files or writes logs for application events
//! itself.

use time::Date;

use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Outdoor data port (driven adapter: weather data → domain)
// ───────────────────────────────────────────────────────────────

/// Hourly outdoor temperature lookup.
///
/// Implementations must match the `"YYYY-MM-DD H:00"` key exactly and
/// return [`Error::OutdoorLookup`](crate::error::Error::OutdoorLookup) when
/// no row matches.  No interpolation, no nearest-hour fallback.
pub trait OutdoorSource {
    fn outdoor_temperature(&self, date: Date, hour: u8) -> Result<f64>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
