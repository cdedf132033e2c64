//! Time utilities for report windows and calendar bucketing
//!
//! All timestamps exchanged with callers use one fixed pattern,
//! `yyyy-MM-dd HH:mm:ss`, with second precision and no offset.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// The single date-time exchange pattern (`yyyy-MM-dd HH:mm:ss`)
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date-time string in the fixed exchange pattern
///
/// # Examples
/// ```
/// use sensor_reports::utils::time::parse_date_time;
/// assert!(parse_date_time("2025-03-01 12:30:00").is_ok());
/// assert!(parse_date_time("2025-03-01T12:30:00").is_err());
/// ```
pub fn parse_date_time(value: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT).map_err(|e| {
        AppError::Validation(format!(
            "invalid date '{}' (expected yyyy-MM-dd HH:mm:ss): {}",
            value, e
        ))
    })
}

/// Parse an optional bound; absent input stays absent
pub fn parse_optional_date_time(value: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    value.map(parse_date_time).transpose()
}

/// Format a date-time in the fixed exchange pattern
///
/// # Examples
/// ```
/// use sensor_reports::utils::time::{format_date_time, parse_date_time};
/// let ts = parse_date_time("2024-01-01 08:00:05").unwrap();
/// assert_eq!(format_date_time(&ts), "2024-01-01 08:00:05");
/// ```
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Start of the hour containing `value`
pub fn truncate_to_hour(value: NaiveDateTime) -> NaiveDateTime {
    value
        .date()
        .and_hms_opt(value.hour(), 0, 0)
        .unwrap_or(value)
}

/// Midnight of the day containing `value`
pub fn truncate_to_day(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

/// Render an elapsed time as `1d 02h 03m 04s`, dropping leading zero units
pub fn format_duration(value: &TimeDelta) -> String {
    let total = value.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}{}d {:02}h {:02}m {:02}s", sign, days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}{}h {:02}m {:02}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m {:02}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// Serde adapter writing `NaiveDateTime` in the fixed exchange pattern
///
/// Use with `#[serde(with = "crate::utils::time::fixed_format")]`.
pub mod fixed_format {
    use super::DATE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(DATE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).map_err(de::Error::custom)
    }
}
