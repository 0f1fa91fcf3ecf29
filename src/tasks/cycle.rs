//! Per-cycle worker thread.
//!
//! Each control cycle gets its own named OS thread that drives the
//! actuator and poller futures concurrently under `block_on`.  The
//! controller keeps the [`CycleWorker`] handle to cancel, poll or join it.

use std::sync::Arc;
use std::thread::JoinHandle;

use core::time::Duration;

use futures_lite::future;
use log::{error, info};

use super::actuator::ActuatorTask;
use super::channels::{CycleSignals, PlantChannels};
use super::poller::PollerTask;
use super::tick::Clock;
use crate::control::thermal::Appliance;
use crate::error::{Error, Result};

const THREAD_NAME: &str = "hvac-cycle";
const STACK_KB: usize = 64;

/// Tick periods for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    pub step: Duration,
    pub poll: Duration,
}

/// What a finished cycle reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub appliance: Appliance,
    /// Steps to convergence, or why the cycle ended early.
    pub outcome: Result<u32>,
    pub polls: u32,
}

pub struct CycleWorker {
    appliance: Appliance,
    signals: Arc<CycleSignals>,
    handle: JoinHandle<CycleReport>,
}

impl CycleWorker {
    /// Start `actuator` and a poller on a fresh worker thread.
    ///
    /// The actuator must already be armed.
    pub fn spawn<K: Clock>(
        clock: K,
        actuator: ActuatorTask,
        timing: CycleTiming,
        plant: Arc<PlantChannels>,
    ) -> Result<Self> {
        let appliance = actuator.appliance();
        let signals = Arc::new(CycleSignals::new());
        let worker_signals = Arc::clone(&signals);

        info!(
            "Spawning '{}' for {} (step={:?}, poll={:?}, stack={}KB)",
            THREAD_NAME, appliance, timing.step, timing.poll, STACK_KB
        );

        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.into())
            .stack_size(STACK_KB * 1024)
            .spawn(move || {
                let actuator_tick = clock.ticker(timing.step);
                let poller_tick = clock.ticker(timing.poll);
                let (outcome, polls) = future::block_on(future::zip(
                    actuator.run(actuator_tick, &plant, &worker_signals),
                    PollerTask::run(poller_tick, &plant, &worker_signals),
                ));
                CycleReport {
                    appliance,
                    outcome,
                    polls,
                }
            })
            .map_err(|e| {
                error!("Cycle: thread creation failed: {e}");
                Error::TaskSpawn
            })?;

        Ok(Self {
            appliance,
            signals,
            handle,
        })
    }

    pub fn appliance(&self) -> Appliance {
        self.appliance
    }

    /// Ask the actuator to abandon the cycle at its next suspension point.
    pub fn cancel(&self) {
        self.signals.cancel.signal(());
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker exits.  A panicked worker reports
    /// [`Error::WorkerPanicked`].
    pub fn join(self) -> CycleReport {
        match self.handle.join() {
            Ok(report) => report,
            Err(_) => {
                error!("Cycle: worker for {} panicked", self.appliance);
                CycleReport {
                    appliance: self.appliance,
                    outcome: Err(Error::WorkerPanicked),
                    polls: 0,
                }
            }
        }
    }
}
