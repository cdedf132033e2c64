use crate::analysis::histogram::{DEFAULT_BUCKET_COUNT, DEFAULT_HOURLY_GRANULARITY_MAX_HOURS};
use crate::analysis::statistics::OutlierRule;
use crate::errors::{AppError, AppResult};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reporting: ReportingConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from("./sensor_reports.db"),
        }
    }
}

/// Report engine tuning
///
/// Defaults reproduce the standard behaviour: 2-sigma outliers, 20 buckets
/// for value and duration histograms, hourly calendar buckets up to 48 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingConfig {
    pub outlier_sigma: f64,
    pub value_bucket_count: usize,
    pub duration_bucket_count: usize,
    pub hourly_granularity_max_hours: i64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            outlier_sigma: OutlierRule::DEFAULT_SIGMA,
            value_bucket_count: DEFAULT_BUCKET_COUNT,
            duration_bucket_count: DEFAULT_BUCKET_COUNT,
            hourly_granularity_max_hours: DEFAULT_HOURLY_GRANULARITY_MAX_HOURS,
        }
    }
}

impl ReportingConfig {
    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> AppResult<()> {
        OutlierRule::new(self.outlier_sigma)?;
        if self.value_bucket_count == 0 || self.duration_bucket_count == 0 {
            return Err(AppError::Validation(
                "histogram bucket counts must be at least 1".to_string(),
            ));
        }
        if self.hourly_granularity_max_hours < 0 {
            return Err(AppError::Validation(
                "hourly_granularity_max_hours must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub batch_size: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { batch_size: 10_000 }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration.
    /// Reporting settings the engine cannot honour are a `Validation` error.
    pub fn load() -> AppResult<Self> {
        let reporting = ReportingConfig::default();
        let config = Config::builder()
            .set_default(
                "database.default_path",
                DatabaseConfig::default()
                    .default_path
                    .to_string_lossy()
                    .to_string(),
            )?
            .set_default("reporting.outlier_sigma", reporting.outlier_sigma)?
            .set_default(
                "reporting.value_bucket_count",
                reporting.value_bucket_count as i64,
            )?
            .set_default(
                "reporting.duration_bucket_count",
                reporting.duration_bucket_count as i64,
            )?
            .set_default(
                "reporting.hourly_granularity_max_hours",
                reporting.hourly_granularity_max_hours,
            )?
            .set_default(
                "processing.batch_size",
                ProcessingConfig::default().batch_size as i64,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // SENSOR_REPORTS_REPORTING__OUTLIER_SIGMA=3 style overrides
            .add_source(
                config::Environment::with_prefix("SENSOR_REPORTS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(db_path) = env::var("SENSOR_REPORTS_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        app_config.reporting.validate()?;

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> AppResult<Self> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Falling back to default configuration: {}", e);
                Ok(Self::default())
            }
        }
    }
}
