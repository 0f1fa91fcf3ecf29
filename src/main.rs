//! ZoneHVAC command line: a text stand-in for the presentation layer.
//!
//! Issues one control request, then polls the snapshot views at a fixed
//! cadence until the cycle ends.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CsvOutdoorSource   LogEventSink   console_log           │
//! │  (OutdoorSource)    (EventSink)    (log backend)         │
//! │  ─────────────────── Port Trait Boundary ─────────────── │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  ControllerCore: mode · fan · actuator · poller    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use zonehvac::adapters::console_log;
use zonehvac::adapters::csv_source::CsvOutdoorSource;
use zonehvac::adapters::log_sink::LogEventSink;
use zonehvac::app::service::ControllerCore;
use zonehvac::app::views::{SystemOverview, ViewValue};
use zonehvac::config::SimulationConfig;
use zonehvac::tasks::tick::{Clock, InstantClock, ReactorClock};

const OVERVIEW_LABELS: [&str; SystemOverview::FIELDS] = [
    "bdrm1", "bdrm2", "bdrm3", "bath1", "bath2", "living", "kitchen", "mech", "rec", "outdoor",
    "date", "time", "mode", "furnace", "furnace_q", "aircon", "aircon_q", "fan", "damp_sup",
    "damp_ret", "damp_out",
];

#[derive(Debug, Parser)]
#[command(version, about = "Multi-zone HVAC thermal simulation")]
struct Args {
    /// Hourly outdoor data: timestamp,temperature,humidity
    #[arg(long)]
    data: PathBuf,

    /// Target indoor temperature (°C)
    #[arg(long, default_value_t = 22.0, allow_negative_numbers = true)]
    setpoint: f64,

    /// Simulated date, YYYY-MM-DD
    #[arg(long, default_value = "2024-01-01")]
    date: String,

    /// Simulated time of day, H:MM
    #[arg(long, default_value = "0:00")]
    time: String,

    /// JSON file overriding simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snapshot refresh period (milliseconds)
    #[arg(long, default_value_t = 1000)]
    refresh_ms: u64,

    /// Step as fast as possible instead of in real time
    #[arg(long)]
    instant: bool,

    /// Print snapshots as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();
    console_log::init(args.log_level).context("installing logger")?;

    info!("ZoneHVAC v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimulationConfig::from_json_str(&json)?
        }
        None => SimulationConfig::default(),
    };
    let source = CsvOutdoorSource::open(&args.data)?;

    if args.instant {
        run(&args, config, source, InstantClock)
    } else {
        run(&args, config, source, ReactorClock)
    }
}

fn run<K: Clock>(args: &Args, config: SimulationConfig, source: CsvOutdoorSource, clock: K) -> Result<()> {
    let mut controller = ControllerCore::new(config, source, clock)?;
    let mut sink = LogEventSink::new();

    controller.start_cycle(args.setpoint, &args.date, &args.time, &mut sink)?;

    let refresh = Duration::from_millis(args.refresh_ms.max(1));
    loop {
        print_overview(&controller.system_overview(), args.json)?;
        if let Some(report) = controller.reap(&mut sink) {
            print_overview(&controller.system_overview(), args.json)?;
            if args.json {
                println!("{}", serde_json::to_string(&controller.mechanical_room_view())?);
            }
            return report.outcome.map(|_| ()).map_err(Into::into);
        }
        if !controller.is_cycle_active() && controller.last_report().is_none() {
            // Normal mode: nothing was started.
            return Ok(());
        }
        std::thread::sleep(refresh);
    }
}

fn print_overview(overview: &SystemOverview, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(overview)?);
        return Ok(());
    }
    let line = OVERVIEW_LABELS
        .iter()
        .zip(overview.values())
        .map(|(label, value): (&&str, ViewValue)| format!("{label}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
    Ok(())
}
