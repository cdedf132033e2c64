//! Ingestion configuration, CSV row shape and import statistics

use crate::errors::{AppError, AppResult};
use crate::types::Measurement;
use crate::utils::time::parse_date_time;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Settings for a measurement CSV import
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub csv_path: PathBuf,
    pub database_path: PathBuf,
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: "./measurements.csv".into(),
            database_path: "./sensor_reports.db".into(),
            batch_size: 10_000,
        }
    }
}

/// One CSV row: `network_code,gateway_code,sensor_code,value,timestamp`
///
/// Value and timestamp stay textual until [`MeasurementRecord::to_measurement`]
/// so a bad cell marks the row malformed instead of aborting the reader.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementRecord {
    pub network_code: String,
    pub gateway_code: String,
    pub sensor_code: String,
    pub value: String,
    pub timestamp: String,
}

impl MeasurementRecord {
    pub fn to_measurement(&self) -> AppResult<Measurement> {
        let value: f64 = self.value.trim().parse().map_err(|_| {
            AppError::InvalidData(format!("value '{}' is not a number", self.value))
        })?;
        if !value.is_finite() {
            return Err(AppError::InvalidData(format!(
                "value '{}' is not finite",
                self.value
            )));
        }
        let timestamp = parse_date_time(&self.timestamp)?;

        Ok(Measurement::new(
            self.network_code.trim(),
            self.gateway_code.trim(),
            self.sensor_code.trim(),
            value,
            timestamp,
        ))
    }
}

/// Counters collected while importing a CSV file
#[derive(Debug, Clone)]
pub struct ImportStats {
    pub total_rows: usize,
    pub imported: usize,
    pub malformed: usize,
    pub unknown_topology: usize,
    pub batches_processed: usize,
    start_time: Instant,
    duration: Duration,
}

impl Default for ImportStats {
    fn default() -> Self {
        Self {
            total_rows: 0,
            imported: 0,
            malformed: 0,
            unknown_topology: 0,
            batches_processed: 0,
            start_time: Instant::now(),
            duration: Duration::default(),
        }
    }
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.duration = self.start_time.elapsed();
    }

    pub fn duration(&self) -> Duration {
        if self.duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.duration
        }
    }

    /// Rows per second over the whole import
    pub fn processing_rate(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs > 0.0 {
            self.total_rows as f64 / secs
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Rows: {} | Imported: {} | Malformed: {} | Unknown topology: {} | Batches: {} | {:.2}s ({:.0} rows/s)",
            self.total_rows,
            self.imported,
            self.malformed,
            self.unknown_topology,
            self.batches_processed,
            self.duration().as_secs_f64(),
            self.processing_rate()
        )
    }
}
