//! Gateway report assembly
//!
//! Sensor activity and load, outlier sensors judged on their mean value,
//! battery charge, and a histogram of inter-arrival times between
//! consecutive measurements.

use crate::analysis::aggregation::{count_by_key, least_active, load_ratios, most_active};
use crate::analysis::filters::{filter_measurements, OwnerFilter, ReportRequest};
use crate::analysis::histogram::{BucketWindow, FixedBucketCount, HistogramBuilder};
use crate::analysis::statistics::{summarize, OutlierRule};
use crate::config::ReportingConfig;
use crate::database::MeasurementStore;
use crate::errors::AppResult;
use crate::types::analysis_results::{GatewayReport, ReportHeader};
use crate::types::{Gateway, GatewayParameter, Measurement};
use chrono::TimeDelta;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds [`GatewayReport`]s
pub struct GatewayReportAnalyser;

impl GatewayReportAnalyser {
    pub fn analyse<S: MeasurementStore + ?Sized>(
        store: &S,
        gateway: &Gateway,
        request: &ReportRequest,
        settings: &ReportingConfig,
    ) -> AppResult<GatewayReport> {
        let measurements = filter_measurements(
            store.read_all()?,
            OwnerFilter::Gateway,
            &gateway.code,
            &request.window,
        );
        Self::from_measurements(gateway, request, &measurements, settings)
    }

    /// Assemble from measurements already filtered to the gateway and window
    pub fn from_measurements(
        gateway: &Gateway,
        request: &ReportRequest,
        measurements: &[Measurement],
        settings: &ReportingConfig,
    ) -> AppResult<GatewayReport> {
        let rule = OutlierRule::new(settings.outlier_sigma)?;
        let total = measurements.len() as u64;
        let per_sensor = count_by_key(measurements, |m| m.sensor_code.as_str());

        let outlier_sensors = Self::outlier_sensors(gateway, measurements, &rule);

        let gaps = Self::inter_arrival_times(measurements);
        let histogram = HistogramBuilder::new(FixedBucketCount::new(settings.duration_bucket_count)?)
            .build(&gaps, &BucketWindow::default())?;

        debug!(
            "Gateway {}: {} measurements from {} sensors, {} outlier sensors",
            gateway.code,
            total,
            per_sensor.len(),
            outlier_sensors.len()
        );

        Ok(GatewayReport::new(
            ReportHeader::from(request),
            total,
            most_active(&per_sensor),
            least_active(&per_sensor),
            load_ratios(&per_sensor, total),
            outlier_sensors,
            gateway.parameter(GatewayParameter::BatteryCharge),
            histogram,
        ))
    }

    /// Sensors whose mean value breaks the outlier rule
    ///
    /// The reference is the gateway's EXPECTED_MEAN / EXPECTED_STD_DEV pair;
    /// if either is missing, the summary of every value in the window is used.
    fn outlier_sensors(
        gateway: &Gateway,
        measurements: &[Measurement],
        rule: &OutlierRule,
    ) -> Vec<String> {
        let (reference_mean, reference_std) = match (
            gateway.parameter(GatewayParameter::ExpectedMean),
            gateway.parameter(GatewayParameter::ExpectedStdDev),
        ) {
            (Some(mean), Some(std_dev)) => (mean, std_dev),
            _ => {
                let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
                let summary = summarize(&values);
                (summary.mean, summary.std_dev)
            }
        };

        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for m in measurements {
            let entry = sums.entry(m.sensor_code.as_str()).or_insert((0.0, 0));
            entry.0 += m.value;
            entry.1 += 1;
        }

        sums.into_iter()
            .filter(|(_, (sum, count))| {
                rule.is_outlier(sum / *count as f64, reference_mean, reference_std)
            })
            .map(|(code, _)| code.to_string())
            .collect()
    }

    /// Gaps between consecutive measurements in timestamp order
    fn inter_arrival_times(measurements: &[Measurement]) -> Vec<TimeDelta> {
        let mut timestamps: Vec<_> = measurements.iter().map(|m| m.timestamp).collect();
        timestamps.sort();
        timestamps.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }
}
