//! Sensor report formatter

use super::utils::{export_json, format_bound, format_histogram, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::analysis_results::{Report, SensorReport};
use crate::utils::time::format_date_time;

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

pub fn format_sensor_report(report: &SensorReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("=== SENSOR REPORT: {} ===\n\n", report.code()));
            output.push_str(&format!(
                "Window:        {} .. {}\n",
                format_bound(report.start_date()),
                format_bound(report.end_date())
            ));
            output.push_str(&format!(
                "Measurements:  {}\n",
                format_number(report.number_of_measurements())
            ));
            output.push_str(&format!("Mean:          {:.4}\n", report.mean()));
            output.push_str(&format!("Variance:      {:.4}\n", report.variance()));
            output.push_str(&format!("Std deviation: {:.4}\n", report.std_dev()));
            output.push_str(&format!(
                "Minimum:       {}\n",
                format_optional(report.minimum_measured_value())
            ));
            output.push_str(&format!(
                "Maximum:       {}\n",
                format_optional(report.maximum_measured_value())
            ));

            output.push_str(&format!("\nOutliers ({}):\n", report.outliers().len()));
            if report.outliers().is_empty() {
                output.push_str("  (none)\n");
            }
            for outlier in report.outliers() {
                output.push_str(&format!(
                    "  {}  {:>12.4}\n",
                    format_date_time(&outlier.timestamp),
                    outlier.value
                ));
            }

            output.push_str(&format_histogram(report.histogram()));

            Ok(output)
        }
        OutputFormat::Json => export_json(report),
    }
}
