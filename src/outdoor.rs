//! Hourly outdoor temperature series.
//!
//! An immutable table of `(timestamp, temperature, humidity)` rows keyed by
//! the exact string `"YYYY-MM-DD H:00"` (hour without padding).  Lookups are
//! exact-match only: no interpolation and no nearest-hour fallback.

use core::fmt::Write as _;
use std::collections::HashMap;

use anyhow::{Context, bail};
use log::{debug, info};
use time::macros::format_description;
use time::{Date, Time};

use crate::error::{InputError, LookupError, Result};

/// Capacity of a formatted lookup key (`"YYYY-MM-DD HH:00"` is 16 bytes).
pub const KEY_CAPACITY: usize = 20;

/// One row of the outdoor data file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorRecord {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
}

// ───────────────────────────────────────────────────────────────
// Request parsing
// ───────────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` calendar date.  Month and day may omit the leading zero.
pub fn parse_date(input: &str) -> Result<Date> {
    let format = format_description!("[year]-[month padding:none]-[day padding:none]");
    Date::parse(input.trim(), format).map_err(|_| InputError::Date.into())
}

/// Parse an `H:MM` time of day (hour may be one or two digits).
pub fn parse_time(input: &str) -> Result<Time> {
    let format = format_description!("[hour padding:none]:[minute]");
    Time::parse(input.trim(), format).map_err(|_| InputError::Time.into())
}

/// Canonical `YYYY-MM-DD` rendering of a date.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Build the lookup key for a date and hour, e.g. `"2024-01-01 7:00"`.
pub fn timestamp_key(date: Date, hour: u8) -> heapless::String<KEY_CAPACITY> {
    let mut key = heapless::String::new();
    // Longest possible key is 16 bytes, well inside the capacity.
    let _ = write!(
        key,
        "{:04}-{:02}-{:02} {}:00",
        date.year(),
        u8::from(date.month()),
        date.day(),
        hour
    );
    key
}

// ───────────────────────────────────────────────────────────────
// Series
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct OutdoorTemperatureSeries {
    records: Vec<OutdoorRecord>,
    /// Timestamp -> first row carrying it.
    index: HashMap<String, usize>,
}

impl OutdoorTemperatureSeries {
    /// Build a series from rows in file order.  When a timestamp repeats,
    /// the earliest row is the one lookups return.
    pub fn from_records(records: Vec<OutdoorRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            index.entry(record.timestamp.clone()).or_insert(i);
        }
        Self { records, index }
    }

    /// Parse comma-separated `timestamp,temperature,humidity` rows.
    ///
    /// A leading header row is recognised by a non-numeric temperature
    /// column and skipped.  Blank lines are ignored.
    pub fn from_csv(text: &str) -> anyhow::Result<Self> {
        let mut records = Vec::new();
        let mut first_row = true;

        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split(',').map(str::trim);
            let (Some(timestamp), Some(temp), Some(humidity)) = (cols.next(), cols.next(), cols.next())
            else {
                bail!("line {}: expected timestamp,temperature,humidity", n + 1);
            };

            if first_row {
                first_row = false;
                if temp.parse::<f64>().is_err() {
                    debug!("Outdoor: skipping header '{line}'");
                    continue;
                }
            }

            let temperature = temp
                .parse::<f64>()
                .with_context(|| format!("line {}: bad temperature '{temp}'", n + 1))?;
            let humidity = humidity
                .parse::<f64>()
                .with_context(|| format!("line {}: bad humidity '{humidity}'", n + 1))?;
            if !temperature.is_finite() || !humidity.is_finite() {
                bail!("line {}: non-finite reading '{temp},{humidity}'", n + 1);
            }
            records.push(OutdoorRecord {
                timestamp: timestamp.to_owned(),
                temperature,
                humidity,
            });
        }

        let series = Self::from_records(records);
        info!(
            "Outdoor: loaded {} rows ({} distinct hours)",
            series.len(),
            series.index.len()
        );
        Ok(series)
    }

    /// Outdoor temperature for the given date and hour.
    pub fn lookup(&self, date: Date, hour: u8) -> Result<f64> {
        self.record(date, hour).map(|r| r.temperature)
    }

    /// Full row (temperature and humidity) for the given date and hour.
    pub fn record(&self, date: Date, hour: u8) -> Result<&OutdoorRecord> {
        let key = timestamp_key(date, hour);
        self.index
            .get(key.as_str())
            .map(|&i| &self.records[i])
            .ok_or_else(|| {
                LookupError {
                    key: key.as_str().to_owned(),
                }
                .into()
            })
    }

    /// Number of rows loaded, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
