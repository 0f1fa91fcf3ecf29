//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A UI or network adapter would implement the same
//! trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CycleStarted {
                mode,
                appliance,
                setpoint,
                outdoor_temp,
            } => {
                info!(
                    "CYCLE | start | mode={} | actuator={} | setpoint={:.2}\u{00b0}C | outdoor={:.2}\u{00b0}C",
                    mode,
                    appliance.map_or("none", |a| a.name()),
                    setpoint,
                    outdoor_temp,
                );
            }
            AppEvent::CycleSuperseded(appliance) => {
                info!("CYCLE | superseded | actuator={}", appliance);
            }
            AppEvent::FanDegraded(mode) => {
                warn!("FAN | degraded | no speed for {}, fan Off", mode);
            }
            AppEvent::RequestRejected(e) => {
                warn!("REQUEST | rejected | {}", e);
            }
            AppEvent::CycleFinished(report) => match &report.outcome {
                Ok(steps) => info!(
                    "CYCLE | converged | actuator={} | steps={} | polls={}",
                    report.appliance, steps, report.polls
                ),
                Err(e) => warn!(
                    "CYCLE | ended | actuator={} | polls={} | {}",
                    report.appliance, report.polls, e
                ),
            },
        }
    }
}
