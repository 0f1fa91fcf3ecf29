//! Furnace / air-conditioner actuator task.
//!
//! ```text
//!  Idle ──start──▶ Running ──crossed──▶ Converged
//!                     │
//!                     ├──bound hit──▶ Faulted   (NonConvergence)
//!                     └──cancel────▶ Cancelled
//! ```
//!
//! While Running the task is the only writer of the plant reading.  It
//! steps the thermal model, publishes temperature and energy, then waits
//! one tick, so `n` steps take at least `n` periods of wall time.  It
//! sets its status on leaving Running, records the terminal phase and
//! raises the stop signal for the poller.

use futures_lite::future;
use log::{debug, error, info, warn};

use super::channels::{ApplianceStatus, CyclePhase, CycleSignals, PlantChannels};
use super::tick::Tick;
use crate::control::thermal::{Appliance, ThermalModel};
use crate::error::{ConvergenceFault, Error, Result};

enum Wake {
    Tick,
    Cancel,
}

pub struct ActuatorTask {
    appliance: Appliance,
    model: ThermalModel,
    start_temp: f64,
    setpoint: f64,
    max_iterations: u32,
}

impl ActuatorTask {
    pub fn new(
        appliance: Appliance,
        model: ThermalModel,
        start_temp: f64,
        setpoint: f64,
        max_iterations: u32,
    ) -> Self {
        Self {
            appliance,
            model,
            start_temp,
            setpoint,
            max_iterations,
        }
    }

    pub fn appliance(&self) -> Appliance {
        self.appliance
    }

    /// Publish the Running state: this appliance On, the other forced Off,
    /// temperature reset to the start value.
    ///
    /// Called by the controller before the worker is spawned so snapshots
    /// taken right after a request already reflect the new cycle.
    pub fn arm(&self, plant: &PlantChannels) {
        let appliance = self.appliance;
        let start_temp = self.start_temp;
        plant.reading.modify(|r| {
            r.current_temp = start_temp;
            r.furnace.status = ApplianceStatus::Off;
            r.aircon.status = ApplianceStatus::Off;
            r.furnace.energy = 0.0;
            r.aircon.energy = 0.0;
            r.appliance_mut(appliance).status = ApplianceStatus::On;
        });
        plant.phase.publish(CyclePhase::Running);
        info!(
            "Actuator[{}]: Idle -> Running ({:.2} -> {:.2})",
            appliance, start_temp, self.setpoint
        );
    }

    /// Drive the temperature toward the setpoint.
    ///
    /// Returns the number of steps taken on convergence.
    pub async fn run<T: Tick>(self, mut tick: T, plant: &PlantChannels, signals: &CycleSignals) -> Result<u32> {
        let appliance = self.appliance;
        let mut temp = self.start_temp;
        let mut iterations: u32 = 0;

        let outcome = loop {
            if ThermalModel::reached(temp, self.setpoint, appliance) {
                break Ok(iterations);
            }
            if iterations >= self.max_iterations {
                break Err(Error::from(ConvergenceFault {
                    iterations,
                    last_temp: temp,
                }));
            }
            let step = self.model.step(temp, self.setpoint, appliance);
            temp = step.temp;
            iterations += 1;
            plant.reading.modify(|r| {
                r.current_temp = step.temp;
                r.appliance_mut(appliance).energy = step.output;
            });
            debug!(
                "Actuator[{}]: step {} T={:.3} Q={:.0}",
                appliance, iterations, step.temp, step.output
            );

            // Every step holds for one full period before the next check.
            let wake = future::or(
                async {
                    tick.next().await;
                    Wake::Tick
                },
                async {
                    signals.cancel.wait().await;
                    Wake::Cancel
                },
            )
            .await;
            if matches!(wake, Wake::Cancel) {
                break Err(Error::Cancelled);
            }
        };

        let (status, phase) = match &outcome {
            Ok(_) => (ApplianceStatus::Off, CyclePhase::Converged),
            Err(Error::Cancelled) => (ApplianceStatus::Off, CyclePhase::Cancelled),
            Err(_) => (ApplianceStatus::Fault, CyclePhase::Faulted),
        };
        plant.reading.modify(|r| {
            let state = r.appliance_mut(appliance);
            state.status = status;
            state.energy = 0.0;
        });
        plant.phase.publish(phase);

        match &outcome {
            Ok(n) => info!(
                "Actuator[{}]: Running -> Converged after {} steps at {:.2}",
                appliance, n, temp
            ),
            Err(Error::Cancelled) => warn!(
                "Actuator[{}]: Running -> Cancelled after {} steps at {:.2}",
                appliance, iterations, temp
            ),
            Err(e) => error!("Actuator[{}]: Running -> Faulted: {}", appliance, e),
        }

        signals.stop.signal(());
        outcome
    }
}
