//! Network report assembly
//!
//! Gateway activity ranking, gateway load ratios and a calendar-time
//! histogram whose granularity adapts to the effective window length.

use crate::analysis::aggregation::{count_by_key, least_active, load_ratios, most_active};
use crate::analysis::filters::{filter_measurements, OwnerFilter, ReportRequest};
use crate::analysis::histogram::{
    AdaptiveCalendarBuckets, BucketWindow, CalendarGranularity, Histogram, HistogramBuilder,
};
use crate::config::ReportingConfig;
use crate::database::MeasurementStore;
use crate::errors::AppResult;
use crate::types::analysis_results::{NetworkReport, ReportHeader};
use crate::types::Measurement;
use chrono::NaiveDateTime;
use tracing::debug;

/// Builds [`NetworkReport`]s
pub struct NetworkReportAnalyser;

impl NetworkReportAnalyser {
    /// One bulk read, then filter by network code and window
    pub fn analyse<S: MeasurementStore + ?Sized>(
        store: &S,
        request: &ReportRequest,
        settings: &ReportingConfig,
    ) -> AppResult<NetworkReport> {
        let measurements = filter_measurements(
            store.read_all()?,
            OwnerFilter::Network,
            &request.code,
            &request.window,
        );
        Self::from_measurements(request, &measurements, settings)
    }

    /// Assemble from measurements already filtered to the network and window
    pub fn from_measurements(
        request: &ReportRequest,
        measurements: &[Measurement],
        settings: &ReportingConfig,
    ) -> AppResult<NetworkReport> {
        let total = measurements.len() as u64;
        let per_gateway = count_by_key(measurements, |m| m.gateway_code.as_str());

        let (granularity, histogram) = Self::calendar_histogram(request, measurements, settings)?;

        debug!(
            "Network {}: {} measurements over {} gateways, {} buckets",
            request.code,
            total,
            per_gateway.len(),
            histogram.len()
        );

        Ok(NetworkReport::new(
            ReportHeader::from(request),
            total,
            most_active(&per_gateway),
            least_active(&per_gateway),
            load_ratios(&per_gateway, total),
            granularity,
            histogram,
        ))
    }

    fn calendar_histogram(
        request: &ReportRequest,
        measurements: &[Measurement],
        settings: &ReportingConfig,
    ) -> AppResult<(Option<CalendarGranularity>, Histogram<NaiveDateTime>)> {
        let timestamps: Vec<NaiveDateTime> = measurements.iter().map(|m| m.timestamp).collect();
        let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) else {
            return Ok((None, Histogram::empty()));
        };

        let policy = AdaptiveCalendarBuckets::new(settings.hourly_granularity_max_hours)?;
        let start = request.window.start.unwrap_or(*first);
        let end = request.window.end.unwrap_or(*last);
        let granularity = policy.granularity_for(start, end);

        let histogram = HistogramBuilder::new(policy).build(
            &timestamps,
            &BucketWindow::new(request.window.start, request.window.end),
        )?;

        Ok((Some(granularity), histogram))
    }
}
