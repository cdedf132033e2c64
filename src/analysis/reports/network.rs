//! Network report formatter

use super::utils::{
    export_json, format_bound, format_codes, format_histogram, format_load_ratios, format_number,
};
use super::OutputFormat;
use crate::analysis::histogram::CalendarGranularity;
use crate::errors::AppResult;
use crate::types::analysis_results::{NetworkReport, Report};

pub fn format_network_report(report: &NetworkReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("=== NETWORK REPORT: {} ===\n\n", report.code()));
            output.push_str(&format!(
                "Window:                {} .. {}\n",
                format_bound(report.start_date()),
                format_bound(report.end_date())
            ));
            output.push_str(&format!(
                "Measurements:          {}\n",
                format_number(report.number_of_measurements())
            ));
            output.push_str(&format!(
                "Most active gateways:  {}\n",
                format_codes(report.most_active_gateways())
            ));
            output.push_str(&format!(
                "Least active gateways: {}\n",
                format_codes(report.least_active_gateways())
            ));
            if let Some(granularity) = report.granularity() {
                let unit = match granularity {
                    CalendarGranularity::Hourly => "hourly",
                    CalendarGranularity::Daily => "daily",
                };
                output.push_str(&format!("Bucket granularity:    {}\n", unit));
            }

            output.push_str(&format_load_ratios(
                "Gateway load",
                report.gateways_load_ratio(),
            ));
            output.push_str(&format_histogram(report.histogram()));

            Ok(output)
        }
        OutputFormat::Json => export_json(report),
    }
}
