//! Gateway report formatter

use super::utils::{
    export_json, format_bound, format_codes, format_histogram, format_load_ratios, format_number,
};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::analysis_results::{GatewayReport, Report};

pub fn format_gateway_report(report: &GatewayReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!("=== GATEWAY REPORT: {} ===\n\n", report.code()));
            output.push_str(&format!(
                "Window:               {} .. {}\n",
                format_bound(report.start_date()),
                format_bound(report.end_date())
            ));
            output.push_str(&format!(
                "Measurements:         {}\n",
                format_number(report.number_of_measurements())
            ));
            output.push_str(&format!(
                "Most active sensors:  {}\n",
                format_codes(report.most_active_sensors())
            ));
            output.push_str(&format!(
                "Least active sensors: {}\n",
                format_codes(report.least_active_sensors())
            ));
            output.push_str(&format!(
                "Outlier sensors:      {}\n",
                format_codes(report.outlier_sensors())
            ));
            match report.battery_charge_percentage() {
                Some(charge) => {
                    output.push_str(&format!("Battery charge:       {:.1}%\n", charge))
                }
                None => output.push_str("Battery charge:       unknown\n"),
            }

            output.push_str(&format_load_ratios("Sensor load", report.sensors_load_ratio()));
            output.push_str(&format_histogram(report.histogram()));

            Ok(output)
        }
        OutputFormat::Json => export_json(report),
    }
}
