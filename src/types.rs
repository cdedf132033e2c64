//! Sensor Report Engine - Type System
//!
//! - `measurement`: the immutable timestamped reading every report is built from
//! - `entities`: networks, gateways and sensors as returned by the entity store
//! - `import`: CSV ingestion settings, row shape and statistics
//! - `analysis_results`: the immutable Network/Gateway/Sensor report types

mod entities;
mod import;
mod measurement;

pub mod analysis_results;

pub use entities::{Gateway, GatewayParameter, Network, Sensor};
pub use import::{ImportConfig, ImportStats, MeasurementRecord};
pub use measurement::Measurement;
