use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A monitored network, the root of the topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A gateway collecting measurements from its sensors
///
/// `parameters` are free-form scalar settings keyed by name; the
/// well-known ones are listed in [`GatewayParameter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub code: String,
    pub network_code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

impl Gateway {
    /// Look up a well-known parameter; non-finite values count as absent
    pub fn parameter(&self, parameter: GatewayParameter) -> Option<f64> {
        self.parameters
            .get(parameter.key())
            .copied()
            .filter(|v| v.is_finite())
    }
}

/// Well-known gateway parameter keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayParameter {
    /// Expected mean of the sensors' measured values
    ExpectedMean,
    /// Expected standard deviation of the sensors' measured values
    ExpectedStdDev,
    /// Battery charge, in percent
    BatteryCharge,
}

impl GatewayParameter {
    pub fn key(&self) -> &'static str {
        match self {
            GatewayParameter::ExpectedMean => "EXPECTED_MEAN",
            GatewayParameter::ExpectedStdDev => "EXPECTED_STD_DEV",
            GatewayParameter::BatteryCharge => "BATTERY_CHARGE",
        }
    }
}

/// A sensor attached to a gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub code: String,
    pub gateway_code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
