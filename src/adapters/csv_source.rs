//! Outdoor data adapter backed by an hourly CSV file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use time::Date;

use crate::app::ports::OutdoorSource;
use crate::error::Result;
use crate::outdoor::{OutdoorRecord, OutdoorTemperatureSeries};

/// An in-memory series serves lookups directly.
impl OutdoorSource for OutdoorTemperatureSeries {
    fn outdoor_temperature(&self, date: Date, hour: u8) -> Result<f64> {
        self.lookup(date, hour)
    }
}

/// Series loaded once from `timestamp,temperature,humidity` rows on disk.
#[derive(Debug, Clone)]
pub struct CsvOutdoorSource {
    path: PathBuf,
    series: OutdoorTemperatureSeries,
}

impl CsvOutdoorSource {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading outdoor data {}", path.display()))?;
        let series = OutdoorTemperatureSeries::from_csv(&text)
            .with_context(|| format!("parsing outdoor data {}", path.display()))?;
        Ok(Self { path, series })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn series(&self) -> &OutdoorTemperatureSeries {
        &self.series
    }

    /// Full row, humidity included.
    pub fn record(&self, date: Date, hour: u8) -> Result<&OutdoorRecord> {
        self.series.record(date, hour)
    }
}

impl OutdoorSource for CsvOutdoorSource {
    fn outdoor_temperature(&self, date: Date, hour: u8) -> Result<f64> {
        self.series.lookup(date, hour)
    }
}
