use super::{Report, ReportHeader};
use crate::analysis::histogram::Histogram;
use chrono::TimeDelta;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sensor activity, outliers and inter-arrival times for one gateway
#[derive(Debug, Clone, Serialize)]
pub struct GatewayReport {
    #[serde(flatten)]
    header: ReportHeader,
    number_of_measurements: u64,
    most_active_sensors: Vec<String>,
    least_active_sensors: Vec<String>,
    sensors_load_ratio: BTreeMap<String, f64>,
    outlier_sensors: Vec<String>,
    battery_charge_percentage: Option<f64>,
    histogram: Histogram<TimeDelta>,
}

impl GatewayReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        header: ReportHeader,
        number_of_measurements: u64,
        most_active_sensors: Vec<String>,
        least_active_sensors: Vec<String>,
        sensors_load_ratio: BTreeMap<String, f64>,
        outlier_sensors: Vec<String>,
        battery_charge_percentage: Option<f64>,
        histogram: Histogram<TimeDelta>,
    ) -> Self {
        Self {
            header,
            number_of_measurements,
            most_active_sensors,
            least_active_sensors,
            sensors_load_ratio,
            outlier_sensors,
            battery_charge_percentage,
            histogram,
        }
    }

    pub fn most_active_sensors(&self) -> &[String] {
        &self.most_active_sensors
    }

    pub fn least_active_sensors(&self) -> &[String] {
        &self.least_active_sensors
    }

    pub fn sensors_load_ratio(&self) -> &BTreeMap<String, f64> {
        &self.sensors_load_ratio
    }

    /// Sensors whose mean value deviates from the gateway reference by 2 sigma or more
    pub fn outlier_sensors(&self) -> &[String] {
        &self.outlier_sensors
    }

    pub fn battery_charge_percentage(&self) -> Option<f64> {
        self.battery_charge_percentage
    }
}

impl Report for GatewayReport {
    type Bound = TimeDelta;

    fn header(&self) -> &ReportHeader {
        &self.header
    }

    fn number_of_measurements(&self) -> u64 {
        self.number_of_measurements
    }

    fn histogram(&self) -> &Histogram<TimeDelta> {
        &self.histogram
    }
}
