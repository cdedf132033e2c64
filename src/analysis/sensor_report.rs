//! Sensor report assembly
//!
//! Mean, variance and standard deviation describe every in-window value.
//! Minimum, maximum and the value histogram only use non-outliers so a
//! single spike cannot stretch the displayed range.

use crate::analysis::filters::ReportRequest;
use crate::analysis::histogram::{BucketWindow, FixedBucketCount, Histogram, HistogramBuilder};
use crate::analysis::statistics::{summarize, OutlierRule};
use crate::config::ReportingConfig;
use crate::database::MeasurementStore;
use crate::errors::AppResult;
use crate::types::analysis_results::{ReportHeader, SensorReport};
use crate::types::Measurement;
use tracing::debug;

/// Builds [`SensorReport`]s
pub struct SensorReportAnalyser;

impl SensorReportAnalyser {
    /// Uses the store's ranged sensor read instead of a full scan
    pub fn analyse<S: MeasurementStore + ?Sized>(
        store: &S,
        request: &ReportRequest,
        settings: &ReportingConfig,
    ) -> AppResult<SensorReport> {
        let measurements = store.read_by_sensor_and_range(&request.code, &request.window)?;
        Self::from_measurements(request, &measurements, settings)
    }

    pub fn from_measurements(
        request: &ReportRequest,
        measurements: &[Measurement],
        settings: &ReportingConfig,
    ) -> AppResult<SensorReport> {
        let rule = OutlierRule::new(settings.outlier_sigma)?;

        let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
        let summary = summarize(&values);

        let (regular, outliers) =
            rule.partition(measurements, |m| m.value, summary.mean, summary.std_dev);
        let regular_values: Vec<f64> = regular.iter().map(|m| m.value).collect();
        let regular_summary = summarize(&regular_values);

        // Bucket widths come from the spread, which needs two values
        let histogram = if regular_values.len() < 2 {
            Histogram::empty()
        } else {
            HistogramBuilder::new(FixedBucketCount::new(settings.value_bucket_count)?)
                .build(&regular_values, &BucketWindow::default())?
        };

        debug!(
            "Sensor {}: {} measurements, {} outliers (mean {:.4}, std {:.4})",
            request.code,
            summary.count,
            outliers.len(),
            summary.mean,
            summary.std_dev
        );

        Ok(SensorReport::new(
            ReportHeader::from(request),
            &summary,
            &regular_summary,
            outliers.into_iter().cloned().collect(),
            histogram,
        ))
    }
}
