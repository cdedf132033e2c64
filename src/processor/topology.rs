//! Topology import from TOML
//!
//! ```toml
//! [[networks]]
//! code = "NET_01"
//!
//! [[gateways]]
//! code = "GW_01"
//! network_code = "NET_01"
//! [gateways.parameters]
//! EXPECTED_MEAN = 20.0
//! BATTERY_CHARGE = 85
//!
//! [[sensors]]
//! code = "S_01"
//! gateway_code = "GW_01"
//! ```

use crate::database::{EntityStore, ImportOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{Gateway, Network, Sensor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parsed topology file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

/// Number of entities written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologyStats {
    pub networks: usize,
    pub gateways: usize,
    pub sensors: usize,
}

pub struct TopologyLoader;

impl TopologyLoader {
    pub fn parse(content: &str) -> AppResult<Topology> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_file(path: &Path) -> AppResult<Topology> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Write the topology to the store, parents first
    ///
    /// Every gateway must reference a network and every sensor a gateway that
    /// is either part of this file or already stored; otherwise nothing is written.
    pub fn import<S>(store: &mut S, topology: &Topology) -> AppResult<TopologyStats>
    where
        S: ImportOperations + EntityStore,
    {
        Self::check_references(store, topology)?;

        for network in &topology.networks {
            store.insert_network(network)?;
        }
        for gateway in &topology.gateways {
            store.insert_gateway(gateway)?;
        }
        for sensor in &topology.sensors {
            store.insert_sensor(sensor)?;
        }

        let stats = TopologyStats {
            networks: topology.networks.len(),
            gateways: topology.gateways.len(),
            sensors: topology.sensors.len(),
        };
        info!(
            "Imported topology: {} networks, {} gateways, {} sensors",
            stats.networks, stats.gateways, stats.sensors
        );
        Ok(stats)
    }

    fn check_references<S: EntityStore>(store: &S, topology: &Topology) -> AppResult<()> {
        let networks: HashSet<&str> = topology.networks.iter().map(|n| n.code.as_str()).collect();
        let gateways: HashSet<&str> = topology.gateways.iter().map(|g| g.code.as_str()).collect();

        for gateway in &topology.gateways {
            if !networks.contains(gateway.network_code.as_str())
                && !store.network_exists(&gateway.network_code)?
            {
                return Err(AppError::Validation(format!(
                    "gateway {} references unknown network {}",
                    gateway.code, gateway.network_code
                )));
            }
        }

        for sensor in &topology.sensors {
            if !gateways.contains(sensor.gateway_code.as_str())
                && !store.gateway_exists(&sensor.gateway_code)?
            {
                return Err(AppError::Validation(format!(
                    "sensor {} references unknown gateway {}",
                    sensor.code, sensor.gateway_code
                )));
            }
        }

        Ok(())
    }
}
