//! Report formatting and output generation
//!
//! Provides formatting for report results via the [`ReportFormatter`] facade.
//! Supports Console and JSON output formats.

pub mod gateway;
pub mod network;
pub mod sensor;
pub mod utils;

use crate::errors::AppResult;
use crate::types::analysis_results::{GatewayReport, NetworkReport, SensorReport};

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_number(n: u64) -> String {
        utils::format_number(n)
    }

    pub fn format_network_report(r: &NetworkReport, f: &OutputFormat) -> AppResult<String> {
        network::format_network_report(r, f)
    }

    pub fn format_gateway_report(r: &GatewayReport, f: &OutputFormat) -> AppResult<String> {
        gateway::format_gateway_report(r, f)
    }

    pub fn format_sensor_report(r: &SensorReport, f: &OutputFormat) -> AppResult<String> {
        sensor::format_sensor_report(r, f)
    }
}
