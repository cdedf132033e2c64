//! Store abstractions consumed by the report engine.
//!
//! The engine never reaches for a global repository: it is handed something
//! implementing these traits. [`crate::database::Database`] is the SQLite
//! implementation; tests may wrap it or provide their own.

use crate::analysis::filters::{filter_measurements, OwnerFilter, TimeWindow};
use crate::errors::AppResult;
use crate::types::{Gateway, Measurement, Network, Sensor};

/// Read access to collected measurements
pub trait MeasurementStore {
    /// Every stored measurement, in unspecified order
    fn read_all(&self) -> AppResult<Vec<Measurement>>;

    /// Measurements of one sensor inside an inclusive window
    fn read_by_sensor_and_range(
        &self,
        sensor_code: &str,
        window: &TimeWindow,
    ) -> AppResult<Vec<Measurement>> {
        Ok(filter_measurements(
            self.read_all()?,
            OwnerFilter::Sensor,
            sensor_code,
            window,
        ))
    }
}

/// Lookup of networks, gateways and sensors by code
pub trait EntityStore {
    fn read_network(&self, code: &str) -> AppResult<Option<Network>>;

    fn read_gateway(&self, code: &str) -> AppResult<Option<Gateway>>;

    fn read_sensor(&self, code: &str) -> AppResult<Option<Sensor>>;

    fn network_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self.read_network(code)?.is_some())
    }

    fn gateway_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self.read_gateway(code)?.is_some())
    }

    fn sensor_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self.read_sensor(code)?.is_some())
    }
}

/// Write side used by the CSV and topology importers
pub trait ImportOperations {
    fn insert_network(&mut self, network: &Network) -> AppResult<()>;

    /// Insert a gateway together with its parameters
    fn insert_gateway(&mut self, gateway: &Gateway) -> AppResult<()>;

    fn insert_sensor(&mut self, sensor: &Sensor) -> AppResult<()>;

    /// Insert measurements atomically; returns the number of rows written
    fn insert_measurement_batch(&mut self, batch: &[Measurement]) -> AppResult<usize>;

    fn count_measurements(&self) -> AppResult<u64>;
}
