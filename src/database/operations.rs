//! SQLite implementations of the store traits
//!
//! Window filtering for sensor reads happens in SQL; the fixed timestamp
//! text format compares in chronological order.

use crate::analysis::filters::TimeWindow;
use crate::database::helpers::{
    measurement_from_row, network_from_row, sensor_from_row, MEASUREMENT_COLUMNS,
};
use crate::database::traits::{EntityStore, ImportOperations, MeasurementStore};
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{Gateway, Measurement, Network, Sensor};
use crate::utils::time::format_date_time;
use rusqlite::{params, OptionalExtension};
use std::collections::BTreeMap;
use tracing::debug;

impl MeasurementStore for Database {
    fn read_all(&self) -> AppResult<Vec<Measurement>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM measurements ORDER BY timestamp, id",
            MEASUREMENT_COLUMNS
        ))?;

        let measurements = stmt
            .query_map([], measurement_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} measurements", measurements.len());
        Ok(measurements)
    }

    fn read_by_sensor_and_range(
        &self,
        sensor_code: &str,
        window: &TimeWindow,
    ) -> AppResult<Vec<Measurement>> {
        let start = window.start.as_ref().map(format_date_time);
        let end = window.end.as_ref().map(format_date_time);

        let mut stmt = self.connection().prepare(&format!(
            r#"SELECT {} FROM measurements
               WHERE sensor_code = ?1
                 AND (?2 IS NULL OR timestamp >= ?2)
                 AND (?3 IS NULL OR timestamp <= ?3)
               ORDER BY timestamp, id"#,
            MEASUREMENT_COLUMNS
        ))?;

        let measurements = stmt
            .query_map(params![sensor_code, start, end], measurement_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Read {} measurements for sensor {}",
            measurements.len(),
            sensor_code
        );
        Ok(measurements)
    }
}

impl EntityStore for Database {
    fn read_network(&self, code: &str) -> AppResult<Option<Network>> {
        let network = self
            .connection()
            .query_row(
                "SELECT code, name, description FROM networks WHERE code = ?1",
                [code],
                network_from_row,
            )
            .optional()?;
        Ok(network)
    }

    fn read_gateway(&self, code: &str) -> AppResult<Option<Gateway>> {
        let base = self
            .connection()
            .query_row(
                "SELECT code, network_code, name, description FROM gateways WHERE code = ?1",
                [code],
                |row| {
                    Ok(Gateway {
                        code: row.get(0)?,
                        network_code: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get(3)?,
                        parameters: BTreeMap::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut gateway) = base else {
            return Ok(None);
        };

        let mut stmt = self.connection().prepare(
            "SELECT parameter_key, parameter_value FROM gateway_parameters WHERE gateway_code = ?1",
        )?;
        gateway.parameters = stmt
            .query_map([code], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Some(gateway))
    }

    fn read_sensor(&self, code: &str) -> AppResult<Option<Sensor>> {
        let sensor = self
            .connection()
            .query_row(
                "SELECT code, gateway_code, name, description FROM sensors WHERE code = ?1",
                [code],
                sensor_from_row,
            )
            .optional()?;
        Ok(sensor)
    }

    fn network_exists(&self, code: &str) -> AppResult<bool> {
        self.code_exists("networks", code)
    }

    fn gateway_exists(&self, code: &str) -> AppResult<bool> {
        self.code_exists("gateways", code)
    }

    fn sensor_exists(&self, code: &str) -> AppResult<bool> {
        self.code_exists("sensors", code)
    }
}

impl Database {
    fn code_exists(&self, table: &str, code: &str) -> AppResult<bool> {
        let exists: bool = self.connection().query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE code = ?1)", table),
            [code],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl ImportOperations for Database {
    fn insert_network(&mut self, network: &Network) -> AppResult<()> {
        self.connection().execute(
            r#"INSERT INTO networks (code, name, description) VALUES (?1, ?2, ?3)
               ON CONFLICT(code) DO UPDATE SET name = excluded.name,
                                               description = excluded.description"#,
            params![network.code, network.name, network.description],
        )?;
        Ok(())
    }

    fn insert_gateway(&mut self, gateway: &Gateway) -> AppResult<()> {
        self.execute_transaction(|tx| {
            tx.execute(
                r#"INSERT INTO gateways (code, network_code, name, description)
                   VALUES (?1, ?2, ?3, ?4)
                   ON CONFLICT(code) DO UPDATE SET network_code = excluded.network_code,
                                                   name = excluded.name,
                                                   description = excluded.description"#,
                params![
                    gateway.code,
                    gateway.network_code,
                    gateway.name,
                    gateway.description
                ],
            )?;

            // Parameters are replaced as a set
            tx.execute(
                "DELETE FROM gateway_parameters WHERE gateway_code = ?1",
                params![gateway.code],
            )?;

            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO gateway_parameters
                   (gateway_code, parameter_key, parameter_value)
                   VALUES (?1, ?2, ?3)"#,
            )?;
            for (key, value) in &gateway.parameters {
                stmt.execute(params![gateway.code, key, value])?;
            }
            Ok(())
        })
    }

    fn insert_sensor(&mut self, sensor: &Sensor) -> AppResult<()> {
        self.connection().execute(
            r#"INSERT INTO sensors (code, gateway_code, name, description) VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(code) DO UPDATE SET gateway_code = excluded.gateway_code,
                                               name = excluded.name,
                                               description = excluded.description"#,
            params![
                sensor.code,
                sensor.gateway_code,
                sensor.name,
                sensor.description
            ],
        )?;
        Ok(())
    }

    fn insert_measurement_batch(&mut self, batch: &[Measurement]) -> AppResult<usize> {
        if batch.is_empty() {
            return Ok(0);
        }

        let inserted = self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO measurements
                   (network_code, gateway_code, sensor_code, value, timestamp)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
            )?;

            let mut inserted = 0;
            for measurement in batch {
                inserted += stmt.execute(params![
                    measurement.network_code,
                    measurement.gateway_code,
                    measurement.sensor_code,
                    measurement.value,
                    format_date_time(&measurement.timestamp)
                ])?;
            }
            Ok(inserted)
        })?;

        debug!("Inserted {} measurements", inserted);
        Ok(inserted)
    }

    fn count_measurements(&self) -> AppResult<u64> {
        let count: i64 =
            self.connection()
                .query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
