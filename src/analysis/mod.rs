//! Report & histogram engine
//!
//! The engine turns a filtered measurement set and a requested time window
//! into descriptive statistics, outlier classification, activity ranking and
//! interval-bucketed histograms.
//!
//! ## Overview
//!
//! - **range / histogram** - generic buckets over values, durations and calendar time
//! - **statistics** - summary statistics and the sigma outlier rule
//! - **aggregation** - grouping, most/least active, load ratios
//! - **filters** - request validation and owner/window filtering
//! - **\*_report** - assemblers for the three report kinds
//! - **reports** - console and JSON formatting
//!
//! ## Usage
//!
//! ```rust
//! use sensor_reports::analysis::ReportEngine;
//! use sensor_reports::config::ReportingConfig;
//! use sensor_reports::errors::AppResult;
//!
//! fn example() -> AppResult<()> {
//!     let engine = ReportEngine::new("./sensor_reports.db", ReportingConfig::default())?;
//!     let report = engine.get_sensor_report("S_01", Some("2024-01-01 00:00:00"), None)?;
//!     println!("{}", report.mean());
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod filters;
pub mod gateway_report;
pub mod histogram;
pub mod network_report;
pub mod range;
pub mod reports;
pub mod sensor_report;
pub mod statistics;

pub use filters::{ReportRequest, TimeWindow};
pub use gateway_report::GatewayReportAnalyser;
pub use histogram::{
    AdaptiveCalendarBuckets, BoundaryPolicy, BucketWindow, CalendarGranularity, FixedBucketCount,
    Histogram, HistogramBuilder,
};
pub use network_report::NetworkReportAnalyser;
pub use range::{Range, RangeBound};
pub use reports::{OutputFormat, ReportFormatter};
pub use sensor_report::SensorReportAnalyser;
pub use statistics::{summarize, OutlierRule, Summary};

use crate::config::ReportingConfig;
use crate::database::{Database, EntityStore, MeasurementStore};
use crate::errors::{AppError, AppResult, EntityKind};
use crate::types::analysis_results::{GatewayReport, NetworkReport, SensorReport};
use tracing::info;

/// Entry point for report queries
///
/// Holds an injected store and the reporting settings; no other state is kept
/// between calls, and every call builds a fresh report.
pub struct ReportEngine<S = Database> {
    store: S,
    settings: ReportingConfig,
}

impl ReportEngine<Database> {
    /// Create an engine over the SQLite database at `database_path`
    pub fn new(database_path: &str, settings: ReportingConfig) -> AppResult<Self> {
        Self::with_store(Database::new(database_path)?, settings)
    }
}

impl<S: MeasurementStore + EntityStore> ReportEngine<S> {
    /// Create an engine over any store implementation
    pub fn with_store(store: S, settings: ReportingConfig) -> AppResult<Self> {
        settings.validate()?;
        Ok(Self { store, settings })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &ReportingConfig {
        &self.settings
    }

    /// Gateway activity and calendar histogram for one network
    ///
    /// # Errors
    /// * `Validation` for a blank code, a malformed date or `end < start`
    /// * `ElementNotFound` if the network does not exist (no measurements are read)
    pub fn get_network_report(
        &self,
        code: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<NetworkReport> {
        let request = ReportRequest::parse(code, start_date, end_date)?;
        if !self.store.network_exists(&request.code)? {
            return Err(AppError::not_found(EntityKind::Network, &request.code));
        }

        info!("Building network report for {}", request.code);
        NetworkReportAnalyser::analyse(&self.store, &request, &self.settings)
    }

    /// Sensor activity, outlier sensors and inter-arrival histogram for one gateway
    ///
    /// # Errors
    /// Same as [`Self::get_network_report`], for gateways.
    pub fn get_gateway_report(
        &self,
        code: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<GatewayReport> {
        let request = ReportRequest::parse(code, start_date, end_date)?;
        let gateway = self
            .store
            .read_gateway(&request.code)?
            .ok_or_else(|| AppError::not_found(EntityKind::Gateway, &request.code))?;

        info!("Building gateway report for {}", request.code);
        GatewayReportAnalyser::analyse(&self.store, &gateway, &request, &self.settings)
    }

    /// Statistics, outliers and value histogram for one sensor
    ///
    /// # Errors
    /// Same as [`Self::get_network_report`], for sensors.
    pub fn get_sensor_report(
        &self,
        code: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<SensorReport> {
        let request = ReportRequest::parse(code, start_date, end_date)?;
        if !self.store.sensor_exists(&request.code)? {
            return Err(AppError::not_found(EntityKind::Sensor, &request.code));
        }

        info!("Building sensor report for {}", request.code);
        SensorReportAnalyser::analyse(&self.store, &request, &self.settings)
    }
}
