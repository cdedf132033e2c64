//! Mathematical utility functions for report aggregation
//!
//! Ratio and percentage helpers with explicit zero-division handling.

/// Fraction of `total` attributable to `part`, or `None` when total is zero.
///
/// Undefined ratios are never reported as 0.0 or NaN; callers decide how to
/// represent the missing value.
///
/// # Examples
/// ```
/// use sensor_reports::utils::math::safe_ratio;
///
/// assert_eq!(safe_ratio(1, 4), Some(0.25));
/// assert_eq!(safe_ratio(0, 10), Some(0.0));
/// assert_eq!(safe_ratio(3, 0), None);
/// ```
#[inline]
pub fn safe_ratio(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}

/// Express a 0..1 fraction as a percentage for display.
#[inline]
pub fn ratio_to_percentage(ratio: f64) -> f64 {
    ratio * 100.0
}
