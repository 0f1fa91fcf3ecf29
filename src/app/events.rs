//! Outbound application events.
//!
//! The [`ControllerCore`](super::service::ControllerCore) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::control::mode::Mode;
use crate::control::thermal::Appliance;
use crate::error::Error;
use crate::tasks::cycle::CycleReport;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A request was accepted and its mode decided.
    /// `appliance` is `None` in Normal mode, where nothing runs.
    CycleStarted {
        mode: Mode,
        appliance: Option<Appliance>,
        setpoint: f64,
        outdoor_temp: f64,
    },

    /// A running cycle was cancelled to make way for a new request.
    CycleSuperseded(Appliance),

    /// The fan table had no entry for the decided mode; fan forced Off.
    FanDegraded(Mode),

    /// A request was refused before any state changed.
    RequestRejected(Error),

    /// A background cycle ended (converged, faulted or cancelled).
    CycleFinished(CycleReport),
}
