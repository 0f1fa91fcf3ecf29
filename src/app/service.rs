//! Controller service: the hexagonal core.
//!
//! [`ControllerCore`] owns the session state, the outdoor-data port and
//! the handle of the running cycle.  Requests arrive on the caller's
//! thread and return as soon as a cycle is started; convergence happens on
//! the cycle worker.  Snapshot accessors only copy published values and
//! never wait on the worker.
//!
//! ```text
//!  OutdoorSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                    │      ControllerCore       │
//!        Clock ────▶ │ mode · fan · cycle worker │ ──▶ snapshot views
//!                    └──────────────────────────┘
//! ```

use std::sync::Arc;

use core::time::Duration;

use log::{info, warn};

use crate::config::SimulationConfig;
use crate::control::fan::{FanPolicy, FanSetting, FanSpeedTable, select};
use crate::control::mode::Mode;
use crate::control::thermal::{Appliance, ThermalModel};
use crate::error::{Error, InputError, Result};
use crate::outdoor::{format_date, parse_date, parse_time};
use crate::tasks::actuator::ActuatorTask;
use crate::tasks::channels::{ApplianceStatus, CyclePhase, PlantChannels, PlantReading};
use crate::tasks::cycle::{CycleReport, CycleTiming, CycleWorker};
use crate::tasks::tick::Clock;
use crate::zones::{DamperPosition, ZONE_COUNT, Zone};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, OutdoorSource};
use super::views::{BasementView, GroundFloorView, MechanicalRoomView, SettingsView, SystemOverview, ZoneReading};

// ───────────────────────────────────────────────────────────────
// Session state
// ───────────────────────────────────────────────────────────────

/// Fields only the controller writes, on the caller's thread.
#[derive(Debug, Clone)]
struct Settings {
    setpoint: f64,
    outdoor_temp: f64,
    date: String,
    time: String,
    mode: Mode,
    fan: FanSetting,
}

#[derive(Debug, Clone, Copy)]
struct Dampers {
    supply: DamperPosition,
    return_air: DamperPosition,
    outdoor_air: DamperPosition,
    zones: [DamperPosition; ZONE_COUNT],
}

impl Dampers {
    fn from_config(config: &SimulationConfig) -> Self {
        let d = &config.dampers;
        Self {
            supply: DamperPosition::from_percent(d.supply),
            return_air: DamperPosition::from_percent(d.return_air),
            outdoor_air: DamperPosition::from_percent(d.outdoor_air),
            zones: d.zones.map(DamperPosition::from_percent),
        }
    }
}

/// A validated request, nothing committed yet.
struct Request {
    setpoint: f64,
    date: String,
    time: String,
    outdoor_temp: f64,
}

// ───────────────────────────────────────────────────────────────
// ControllerCore
// ───────────────────────────────────────────────────────────────

pub struct ControllerCore<S: OutdoorSource, K: Clock> {
    outdoor: S,
    clock: K,
    model: ThermalModel,
    fan_speeds: FanSpeedTable,
    timing: CycleTiming,
    max_iterations: u32,
    airflow_cfm: u16,
    dampers: Dampers,
    settings: Settings,
    plant: Arc<PlantChannels>,
    worker: Option<CycleWorker>,
    last_report: Option<CycleReport>,
}

impl<S: OutdoorSource, K: Clock> ControllerCore<S, K> {
    /// Build the controller.  Fails only if `config` does not validate.
    pub fn new(config: SimulationConfig, outdoor: S, clock: K) -> Result<Self> {
        config.validate()?;
        let initial = &config.initial;
        let settings = Settings {
            setpoint: initial.setpoint,
            outdoor_temp: initial.outdoor_temp,
            date: initial.date.clone(),
            time: initial.time.clone(),
            mode: Mode::Normal,
            fan: FanSetting::default(),
        };
        info!(
            "Controller: ready (U={}, C={}, dt={}ms, bound={} steps)",
            config.heat_loss_coefficient,
            config.thermal_capacitance,
            config.step_interval_ms,
            config.max_iterations
        );
        Ok(Self {
            outdoor,
            clock,
            model: config.thermal_model(),
            fan_speeds: config.fan_speeds,
            timing: CycleTiming {
                step: Duration::from_millis(config.step_interval_ms),
                poll: Duration::from_millis(config.poll_interval_ms),
            },
            max_iterations: config.max_iterations,
            airflow_cfm: config.airflow_cfm,
            dampers: Dampers::from_config(&config),
            plant: Arc::new(PlantChannels::new(initial.indoor_temp)),
            settings,
            worker: None,
            last_report: None,
        })
    }

    // ── Requests ──────────────────────────────────────────────

    /// Run a control request.
    ///
    /// Validation and the outdoor lookup happen before anything changes: a
    /// rejected request leaves mode, temperatures and any running cycle
    /// untouched.  An accepted request supersedes a running cycle, then
    /// starts the matching actuator in the background and returns.
    pub fn start_cycle(
        &mut self,
        setpoint: f64,
        date: &str,
        time: &str,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let request = match self.resolve(setpoint, date, time) {
            Ok(r) => r,
            Err(e) => {
                warn!("Controller: request rejected: {e}");
                sink.emit(&AppEvent::RequestRejected(e.clone()));
                return Err(e);
            }
        };

        self.supersede(sink);

        let Request {
            setpoint,
            date,
            time,
            outdoor_temp,
        } = request;
        self.settings.setpoint = setpoint;
        self.settings.outdoor_temp = outdoor_temp;
        self.settings.date = date;
        self.settings.time = time;

        let mode = Mode::decide(setpoint, outdoor_temp);
        self.settings.mode = mode;

        let fan = FanPolicy::apply(&self.fan_speeds, mode, self.settings.fan);
        self.settings.fan = fan.setting;
        if fan.degraded.is_some() {
            sink.emit(&AppEvent::FanDegraded(mode));
        }

        info!(
            "Controller: setpoint {:.2}, outdoor {:.2} at {} {} -> {}",
            setpoint, outdoor_temp, self.settings.date, self.settings.time, mode
        );

        let Some(appliance) = Appliance::for_mode(mode) else {
            self.plant.reading.publish(PlantReading::idle(outdoor_temp));
            self.plant.phase.publish(CyclePhase::Idle);
            info!("Controller: already at setpoint, no actuator started");
            sink.emit(&AppEvent::CycleStarted {
                mode,
                appliance: None,
                setpoint,
                outdoor_temp,
            });
            return Ok(());
        };

        let task = ActuatorTask::new(
            appliance,
            self.model.clone(),
            outdoor_temp,
            setpoint,
            self.max_iterations,
        );
        task.arm(&self.plant);

        match CycleWorker::spawn(self.clock.clone(), task, self.timing, Arc::clone(&self.plant)) {
            Ok(worker) => self.worker = Some(worker),
            Err(e) => {
                self.plant
                    .reading
                    .modify(|r| r.appliance_mut(appliance).status = ApplianceStatus::Fault);
                self.plant.phase.publish(CyclePhase::Faulted);
                return Err(e);
            }
        }

        sink.emit(&AppEvent::CycleStarted {
            mode,
            appliance: Some(appliance),
            setpoint,
            outdoor_temp,
        });
        Ok(())
    }

    /// Re-run control with a new setpoint at the selected date and time.
    pub fn retarget(&mut self, setpoint: f64, sink: &mut impl EventSink) -> Result<()> {
        let date = self.settings.date.clone();
        let time = self.settings.time.clone();
        self.start_cycle(setpoint, &date, &time, sink)
    }

    /// Change the selected date and time without starting a cycle.
    pub fn set_date_time(&mut self, date: &str, time: &str) -> Result<()> {
        let date = format_date(parse_date(date)?);
        let time = parse_time(time)?;
        self.settings.date = date;
        self.settings.time = format!("{}:{:02}", time.hour(), time.minute());
        info!(
            "Controller: date/time set to {} {}",
            self.settings.date, self.settings.time
        );
        Ok(())
    }

    /// Cancel the running cycle and wait for it to wind down.
    ///
    /// Returns the cycle's report, or `None` if nothing was running.
    pub fn cancel_cycle(&mut self, sink: &mut impl EventSink) -> Option<CycleReport> {
        let worker = self.worker.take()?;
        info!("Controller: cancelling {} cycle", worker.appliance());
        worker.cancel();
        Some(self.finish(worker.join(), sink))
    }

    /// Dispatch a command from the presentation layer.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            AppCommand::StartCycle {
                setpoint,
                date,
                time,
            } => self.start_cycle(setpoint, &date, &time, sink),
            AppCommand::Retarget(setpoint) => self.retarget(setpoint, sink),
            AppCommand::SetDateTime { date, time } => {
                self.set_date_time(&date, &time).inspect_err(|e| {
                    sink.emit(&AppEvent::RequestRejected(e.clone()));
                })
            }
            AppCommand::CancelCycle => {
                self.cancel_cycle(sink);
                Ok(())
            }
        }
    }

    // ── Cycle completion ──────────────────────────────────────

    /// Collect the cycle's report if the worker has exited.  Never blocks.
    pub fn reap(&mut self, sink: &mut impl EventSink) -> Option<CycleReport> {
        if !self.worker.as_ref()?.is_finished() {
            return None;
        }
        let worker = self.worker.take()?;
        Some(self.finish(worker.join(), sink))
    }

    /// Block until the running cycle ends and return its report.
    pub fn wait_for_cycle(&mut self, sink: &mut impl EventSink) -> Option<CycleReport> {
        let worker = self.worker.take()?;
        Some(self.finish(worker.join(), sink))
    }

    /// Whether a cycle worker is still attached.
    pub fn is_cycle_active(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    // ── Snapshot accessors ────────────────────────────────────

    pub fn system_overview(&self) -> SystemOverview {
        let reading = self.plant.reading.latest();
        let zones = self.plant.zones.latest();
        let t = |zone: Zone| zones[zone.index()];
        SystemOverview {
            bedroom1_temp: t(Zone::Bedroom1),
            bedroom2_temp: t(Zone::Bedroom2),
            bedroom3_temp: t(Zone::Bedroom3),
            bath1_temp: t(Zone::Bath1),
            bath2_temp: t(Zone::Bath2),
            living_temp: t(Zone::Living),
            kitchen_temp: t(Zone::Kitchen),
            mechanical_room_temp: t(Zone::MechanicalRoom),
            rec_room_temp: t(Zone::RecRoom),
            outdoor_temp: self.settings.outdoor_temp,
            date: self.settings.date.clone(),
            time: self.settings.time.clone(),
            mode: self.settings.mode,
            furnace_status: reading.furnace.status,
            furnace_energy: reading.furnace.energy,
            aircon_status: reading.aircon.status,
            aircon_energy: reading.aircon.energy,
            fan_status: self.settings.fan.status,
            supply_damper: self.dampers.supply,
            return_damper: self.dampers.return_air,
            outdoor_damper: self.dampers.outdoor_air,
        }
    }

    pub fn mechanical_room_view(&self) -> MechanicalRoomView {
        let reading = self.plant.reading.latest();
        MechanicalRoomView {
            furnace_status: reading.furnace.status,
            furnace_energy: reading.furnace.energy,
            aircon_status: reading.aircon.status,
            aircon_energy: reading.aircon.energy,
            fan_status: self.settings.fan.status,
            fan_speed: self.settings.fan.speed,
            airflow_cfm: self.airflow_cfm,
            supply_damper: self.dampers.supply,
            return_damper: self.dampers.return_air,
            outdoor_damper: self.dampers.outdoor_air,
            outdoor_temp: self.settings.outdoor_temp,
        }
    }

    pub fn ground_floor_view(&self) -> GroundFloorView {
        let zones = self.plant.zones.latest();
        let z = |zone| self.zone_reading(&zones, zone);
        GroundFloorView {
            bedroom1: z(Zone::Bedroom1),
            bedroom2: z(Zone::Bedroom2),
            bath1: z(Zone::Bath1),
            living: z(Zone::Living),
            kitchen: z(Zone::Kitchen),
            setpoint: self.settings.setpoint,
            outdoor_temp: self.settings.outdoor_temp,
        }
    }

    pub fn basement_view(&self) -> BasementView {
        let zones = self.plant.zones.latest();
        let z = |zone| self.zone_reading(&zones, zone);
        BasementView {
            bedroom3: z(Zone::Bedroom3),
            bath2: z(Zone::Bath2),
            mechanical_room: z(Zone::MechanicalRoom),
            rec_room: z(Zone::RecRoom),
            setpoint: self.settings.setpoint,
            outdoor_temp: self.settings.outdoor_temp,
        }
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView {
            date: self.settings.date.clone(),
            time: self.settings.time.clone(),
            mode: self.settings.mode,
        }
    }

    /// Latest whole-house temperature published by the actuator.
    pub fn current_temperature(&self) -> f64 {
        self.plant.reading.latest().current_temp
    }

    pub fn cycle_phase(&self) -> CyclePhase {
        self.plant.phase.latest()
    }

    pub fn setpoint(&self) -> f64 {
        self.settings.setpoint
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    /// The outdoor-data port this controller was built with.
    pub fn outdoor(&self) -> &S {
        &self.outdoor
    }

    // ── Internal ──────────────────────────────────────────────

    fn resolve(&self, setpoint: f64, date: &str, time: &str) -> Result<Request> {
        if !setpoint.is_finite() {
            return Err(InputError::Setpoint.into());
        }
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        let outdoor_temp = self.outdoor.outdoor_temperature(date, time.hour())?;
        if !outdoor_temp.is_finite() {
            return Err(InputError::OutdoorReading.into());
        }
        Ok(Request {
            setpoint,
            date: format_date(date),
            time: format!("{}:{:02}", time.hour(), time.minute()),
            outdoor_temp,
        })
    }

    /// Cancel and join a cycle that is still attached.
    fn supersede(&mut self, sink: &mut impl EventSink) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        if !worker.is_finished() {
            info!("Controller: superseding running {} cycle", worker.appliance());
            sink.emit(&AppEvent::CycleSuperseded(worker.appliance()));
            worker.cancel();
        }
        self.finish(worker.join(), sink);
    }

    fn finish(&mut self, report: CycleReport, sink: &mut impl EventSink) -> CycleReport {
        if report.outcome == Err(Error::WorkerPanicked) {
            let appliance = report.appliance;
            self.plant
                .reading
                .modify(|r| r.appliance_mut(appliance).status = ApplianceStatus::Fault);
            self.plant.phase.publish(CyclePhase::Faulted);
        }
        // The air handler drops back to its idle speed once the plant stops.
        if let Ok(speed) = select(&self.fan_speeds, Mode::Normal) {
            self.settings.fan.speed = speed;
        }
        match &report.outcome {
            Ok(steps) => info!("Controller: {} cycle converged in {} steps", report.appliance, steps),
            Err(e) => warn!("Controller: {} cycle ended: {}", report.appliance, e),
        }
        sink.emit(&AppEvent::CycleFinished(report.clone()));
        self.last_report = Some(report.clone());
        report
    }

    fn zone_reading(&self, zones: &[f64; ZONE_COUNT], zone: Zone) -> ZoneReading {
        ZoneReading {
            temperature: zones[zone.index()],
            damper: self.dampers.zones[zone.index()],
        }
    }
}

impl<S: OutdoorSource, K: Clock> Drop for ControllerCore<S, K> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
            let _ = worker.join();
        }
    }
}
