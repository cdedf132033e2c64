use super::{Report, ReportHeader};
use crate::analysis::histogram::{CalendarGranularity, Histogram};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Activity distribution of a network's gateways over a time window
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    #[serde(flatten)]
    header: ReportHeader,
    number_of_measurements: u64,
    most_active_gateways: Vec<String>,
    least_active_gateways: Vec<String>,
    gateways_load_ratio: BTreeMap<String, f64>,
    granularity: Option<CalendarGranularity>,
    histogram: Histogram<NaiveDateTime>,
}

impl NetworkReport {
    pub(crate) fn new(
        header: ReportHeader,
        number_of_measurements: u64,
        most_active_gateways: Vec<String>,
        least_active_gateways: Vec<String>,
        gateways_load_ratio: BTreeMap<String, f64>,
        granularity: Option<CalendarGranularity>,
        histogram: Histogram<NaiveDateTime>,
    ) -> Self {
        Self {
            header,
            number_of_measurements,
            most_active_gateways,
            least_active_gateways,
            gateways_load_ratio,
            granularity,
            histogram,
        }
    }

    /// Gateways with the highest measurement count (ties kept)
    pub fn most_active_gateways(&self) -> &[String] {
        &self.most_active_gateways
    }

    /// Gateways with the lowest measurement count (ties kept)
    pub fn least_active_gateways(&self) -> &[String] {
        &self.least_active_gateways
    }

    /// Fraction of the network's measurements per gateway
    pub fn gateways_load_ratio(&self) -> &BTreeMap<String, f64> {
        &self.gateways_load_ratio
    }

    /// Calendar unit the histogram buckets are aligned to, when non-empty
    pub fn granularity(&self) -> Option<CalendarGranularity> {
        self.granularity
    }
}

impl Report for NetworkReport {
    type Bound = NaiveDateTime;

    fn header(&self) -> &ReportHeader {
        &self.header
    }

    fn number_of_measurements(&self) -> u64 {
        self.number_of_measurements
    }

    fn histogram(&self) -> &Histogram<NaiveDateTime> {
        &self.histogram
    }
}
