use super::{Report, ReportHeader};
use crate::analysis::histogram::Histogram;
use crate::analysis::statistics::Summary;
use crate::types::Measurement;
use serde::Serialize;

/// Descriptive statistics, outliers and value distribution for one sensor
///
/// `mean`, `variance` and `std_dev` cover every in-window measurement.
/// Minimum, maximum and the histogram cover non-outliers only.
#[derive(Debug, Clone, Serialize)]
pub struct SensorReport {
    #[serde(flatten)]
    header: ReportHeader,
    number_of_measurements: u64,
    mean: f64,
    variance: f64,
    std_dev: f64,
    minimum_measured_value: Option<f64>,
    maximum_measured_value: Option<f64>,
    outliers: Vec<Measurement>,
    histogram: Histogram<f64>,
}

impl SensorReport {
    pub(crate) fn new(
        header: ReportHeader,
        summary: &Summary,
        non_outlier_summary: &Summary,
        outliers: Vec<Measurement>,
        histogram: Histogram<f64>,
    ) -> Self {
        Self {
            header,
            number_of_measurements: summary.count as u64,
            mean: summary.mean,
            variance: summary.variance,
            std_dev: summary.std_dev,
            minimum_measured_value: non_outlier_summary.min,
            maximum_measured_value: non_outlier_summary.max,
            outliers,
            histogram,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn minimum_measured_value(&self) -> Option<f64> {
        self.minimum_measured_value
    }

    pub fn maximum_measured_value(&self) -> Option<f64> {
        self.maximum_measured_value
    }

    pub fn outliers(&self) -> &[Measurement] {
        &self.outliers
    }
}

impl Report for SensorReport {
    type Bound = f64;

    fn header(&self) -> &ReportHeader {
        &self.header
    }

    fn number_of_measurements(&self) -> u64 {
        self.number_of_measurements
    }

    fn histogram(&self) -> &Histogram<f64> {
        &self.histogram
    }
}
