//! SQLite schema for the sensor topology and collected measurements
//!
//! Timestamps are stored as `yyyy-MM-dd HH:mm:ss` text, which sorts
//! chronologically and lets range filters run as plain string comparisons.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Create all tables and indexes if they do not exist yet
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS networks (
            code TEXT PRIMARY KEY,
            name TEXT,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS gateways (
            code TEXT PRIMARY KEY,
            network_code TEXT NOT NULL REFERENCES networks(code),
            name TEXT,
            description TEXT
        );

        -- Scalar gateway settings (EXPECTED_MEAN, EXPECTED_STD_DEV, BATTERY_CHARGE, ...)
        CREATE TABLE IF NOT EXISTS gateway_parameters (
            gateway_code TEXT NOT NULL REFERENCES gateways(code),
            parameter_key TEXT NOT NULL,
            parameter_value REAL NOT NULL,
            PRIMARY KEY (gateway_code, parameter_key)
        );

        CREATE TABLE IF NOT EXISTS sensors (
            code TEXT PRIMARY KEY,
            gateway_code TEXT NOT NULL REFERENCES gateways(code),
            name TEXT,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS measurements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            network_code TEXT NOT NULL REFERENCES networks(code),
            gateway_code TEXT NOT NULL REFERENCES gateways(code),
            sensor_code TEXT NOT NULL REFERENCES sensors(code),
            value REAL NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_measurements_sensor_time
            ON measurements(sensor_code, timestamp);
        CREATE INDEX IF NOT EXISTS idx_measurements_gateway
            ON measurements(gateway_code);
        CREATE INDEX IF NOT EXISTS idx_measurements_network
            ON measurements(network_code);
        "#,
    )?;

    debug!("Schema initialised");
    Ok(())
}
