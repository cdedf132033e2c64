//! Descriptive statistics and the sigma-based outlier rule
//!
//! Used twice by the reports: over a sensor's measured values, and over the
//! per-sensor means of a gateway.

use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Summary of a numeric sample
///
/// With fewer than two values `mean`, `variance` and `std_dev` are `0.0`
/// rather than NaN, so single-sample and empty inputs never poison a report.
/// `min`/`max` are `None` only for an empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            min: None,
            max: None,
        }
    }
}

/// Compute count, mean, sample variance (n - 1), standard deviation, min and max
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::empty();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let count = values.len();
    if count < 2 {
        return Summary {
            count,
            min: Some(min),
            max: Some(max),
            ..Summary::empty()
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let variance = squared / (count - 1) as f64;

    Summary {
        count,
        mean,
        variance,
        std_dev: variance.sqrt(),
        min: Some(min),
        max: Some(max),
    }
}

/// `|v - mean| >= sigma * std_dev` outlier rule
///
/// A zero standard deviation never flags anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierRule {
    sigma: f64,
}

impl Default for OutlierRule {
    fn default() -> Self {
        Self {
            sigma: Self::DEFAULT_SIGMA,
        }
    }
}

impl OutlierRule {
    pub const DEFAULT_SIGMA: f64 = 2.0;

    pub fn new(sigma: f64) -> AppResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(AppError::Validation(format!(
                "outlier sigma must be a positive number, got {}",
                sigma
            )));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn is_outlier(&self, value: f64, mean: f64, std_dev: f64) -> bool {
        std_dev > 0.0 && (value - mean).abs() >= self.sigma * std_dev
    }

    /// Split `items` into `(non_outliers, outliers)` against a reference mean/std_dev
    pub fn partition<'a, T, F>(
        &self,
        items: &'a [T],
        value_of: F,
        mean: f64,
        std_dev: f64,
    ) -> (Vec<&'a T>, Vec<&'a T>)
    where
        F: Fn(&T) -> f64,
    {
        items
            .iter()
            .partition(|item| !self.is_outlier(value_of(item), mean, std_dev))
    }
}
