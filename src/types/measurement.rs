use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped reading produced by ingestion
///
/// The engine only reads measurements. Codes identify the owning network,
/// gateway and sensor; `(sensor_code, timestamp)` is the natural ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub network_code: String,
    pub gateway_code: String,
    pub sensor_code: String,
    pub value: f64,
    #[serde(with = "crate::utils::time::fixed_format")]
    pub timestamp: NaiveDateTime,
}

impl Measurement {
    pub fn new(
        network_code: &str,
        gateway_code: &str,
        sensor_code: &str,
        value: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            network_code: network_code.to_string(),
            gateway_code: gateway_code.to_string(),
            sensor_code: sensor_code.to_string(),
            value,
            timestamp,
        }
    }
}
