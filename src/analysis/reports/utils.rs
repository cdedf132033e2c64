//! Utility functions for report formatting
//!
//! Shared helpers used by the network, gateway and sensor formatters.

use crate::analysis::histogram::Histogram;
use crate::analysis::range::RangeBound;
use crate::errors::AppResult;
use crate::utils::math::ratio_to_percentage;
use serde::Serialize;
use std::collections::BTreeMap;

/// Format number with thousand separators for console output
///
/// # Examples
///
/// ```
/// # use sensor_reports::analysis::reports::utils::format_number;
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Comma-separated codes, or `-` when there are none
pub fn format_codes(codes: &[String]) -> String {
    if codes.is_empty() {
        "-".to_string()
    } else {
        codes.join(", ")
    }
}

/// Optional date bound as echoed in report headers
pub fn format_bound(value: Option<&str>) -> &str {
    value.unwrap_or("(unbounded)")
}

/// Load ratio table: code, fraction as percentage
pub fn format_load_ratios(title: &str, ratios: &BTreeMap<String, f64>) -> String {
    let mut output = format!("\n{}:\n", title);
    if ratios.is_empty() {
        output.push_str("  (no measurements)\n");
        return output;
    }
    for (code, ratio) in ratios {
        output.push_str(&format!(
            "  {:<24} {:>8.2}%\n",
            code,
            ratio_to_percentage(*ratio)
        ));
    }
    output
}

/// Bucket table shared by all three report kinds
pub fn format_histogram<T: RangeBound>(histogram: &Histogram<T>) -> String {
    let mut output = String::from("\n=== HISTOGRAM ===\n");
    if histogram.is_empty() {
        output.push_str("  (empty)\n");
        return output;
    }

    output.push_str(&format!("  {:<48} | {:>10}\n", "Bucket", "Count"));
    output.push_str(&format!("  {}\n", "-".repeat(61)));
    for (range, count) in histogram.iter() {
        output.push_str(&format!(
            "  {:<48} | {:>10}\n",
            range.to_string(),
            format_number(count)
        ));
    }
    output
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
