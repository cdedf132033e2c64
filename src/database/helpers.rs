//! Row mapping shared by the store operations

use crate::types::{Measurement, Network, Sensor};
use crate::utils::time::DATE_TIME_FORMAT;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;

/// Standard SELECT columns for measurement queries
///
/// Use with [`measurement_from_row`] to keep column order consistent.
pub const MEASUREMENT_COLUMNS: &str = "network_code, gateway_code, sensor_code, value, timestamp";

/// Construct a Measurement from a row selected with [`MEASUREMENT_COLUMNS`]
pub fn measurement_from_row(row: &Row) -> rusqlite::Result<Measurement> {
    let raw_timestamp: String = row.get(4)?;
    let timestamp = NaiveDateTime::parse_from_str(&raw_timestamp, DATE_TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Measurement {
        network_code: row.get(0)?,
        gateway_code: row.get(1)?,
        sensor_code: row.get(2)?,
        value: row.get(3)?,
        timestamp,
    })
}

/// Construct a Network from `code, name, description`
pub fn network_from_row(row: &Row) -> rusqlite::Result<Network> {
    Ok(Network {
        code: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// Construct a Sensor from `code, gateway_code, name, description`
pub fn sensor_from_row(row: &Row) -> rusqlite::Result<Sensor> {
    Ok(Sensor {
        code: row.get(0)?,
        gateway_code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}
