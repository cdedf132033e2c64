//! Report request parsing and measurement filtering
//!
//! Requests arrive as raw strings (code plus optional date bounds). They are
//! validated in full before any store access, so a bad date or an inverted
//! window never produces a partially computed report.

use crate::errors::{AppError, AppResult};
use crate::types::Measurement;
use crate::utils::time::parse_optional_date_time;
use chrono::NaiveDateTime;

/// Inclusive time window; an absent bound is unbounded on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimeWindow {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> AppResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(AppError::Validation(format!(
                    "end date {} precedes start date {}",
                    end, start
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// `start <= timestamp <= end`, ignoring absent bounds
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.start.map_or(true, |start| *timestamp >= start)
            && self.end.map_or(true, |end| *timestamp <= end)
    }
}

/// Validated report request: code, echoed raw dates and the parsed window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub code: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub window: TimeWindow,
}

impl ReportRequest {
    pub fn parse(code: &str, start_date: Option<&str>, end_date: Option<&str>) -> AppResult<Self> {
        if code.trim().is_empty() {
            return Err(AppError::Validation(
                "a network, gateway or sensor code is required".to_string(),
            ));
        }

        let window = TimeWindow::new(
            parse_optional_date_time(start_date)?,
            parse_optional_date_time(end_date)?,
        )?;

        Ok(Self {
            code: code.to_string(),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            window,
        })
    }
}

/// Which owning-entity code a measurement is matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerFilter {
    Network,
    Gateway,
    Sensor,
}

impl OwnerFilter {
    fn owner_code<'a>(&self, measurement: &'a Measurement) -> &'a str {
        match self {
            OwnerFilter::Network => &measurement.network_code,
            OwnerFilter::Gateway => &measurement.gateway_code,
            OwnerFilter::Sensor => &measurement.sensor_code,
        }
    }
}

/// Keep measurements owned by `code` whose timestamp falls inside `window`
pub fn filter_measurements(
    measurements: Vec<Measurement>,
    owner: OwnerFilter,
    code: &str,
    window: &TimeWindow,
) -> Vec<Measurement> {
    measurements
        .into_iter()
        .filter(|m| owner.owner_code(m) == code)
        .filter(|m| window.contains(&m.timestamp))
        .collect()
}
