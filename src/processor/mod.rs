//! Ingestion plumbing: topology first, then measurements

pub mod csv_processor;
pub mod topology;

pub use csv_processor::CsvProcessor;
pub use topology::{Topology, TopologyLoader, TopologyStats};
