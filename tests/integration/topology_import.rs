//! Topology TOML import against an on-disk database

use sensor_reports::database::{Database, EntityStore};
use sensor_reports::processor::TopologyLoader;
use sensor_reports::types::GatewayParameter;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::common::database::TestDatabase;

const TOPOLOGY: &str = r#"
[[networks]]
code = "NET_01"
name = "Cold storage"
description = "Warehouse A"

[[gateways]]
code = "GW_01"
network_code = "NET_01"
[gateways.parameters]
EXPECTED_MEAN = 4.0
EXPECTED_STD_DEV = 0.5
BATTERY_CHARGE = 42

[[gateways]]
code = "GW_02"
network_code = "NET_01"

[[sensors]]
code = "S_01"
gateway_code = "GW_01"

[[sensors]]
code = "S_02"
gateway_code = "GW_02"
"#;

#[test]
fn test_topology_file_persists_across_connections() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TOPOLOGY.as_bytes()).unwrap();

    let mut test_db = TestDatabase::new("topology_import").unwrap();
    let topology = TopologyLoader::load_file(file.path()).unwrap();
    let stats = TopologyLoader::import(test_db.database_mut(), &topology).unwrap();
    assert_eq!((stats.networks, stats.gateways, stats.sensors), (1, 2, 2));

    let reopened = Database::new(test_db.path()).unwrap();
    let network = reopened.read_network("NET_01").unwrap().unwrap();
    assert_eq!(network.description.as_deref(), Some("Warehouse A"));

    let gateway = reopened.read_gateway("GW_01").unwrap().unwrap();
    assert_eq!(gateway.parameter(GatewayParameter::BatteryCharge), Some(42.0));
    assert_eq!(gateway.parameter(GatewayParameter::ExpectedMean), Some(4.0));

    let bare = reopened.read_gateway("GW_02").unwrap().unwrap();
    assert!(bare.parameters.is_empty());
    assert!(reopened.sensor_exists("S_02").unwrap());
}

#[test]
fn test_reimport_updates_in_place() {
    let mut test_db = TestDatabase::new("topology_reimport").unwrap();
    let topology = TopologyLoader::parse(TOPOLOGY).unwrap();
    TopologyLoader::import(test_db.database_mut(), &topology).unwrap();

    let updated = TopologyLoader::parse(
        r#"
[[gateways]]
code = "GW_01"
network_code = "NET_01"
[gateways.parameters]
BATTERY_CHARGE = 17.5
"#,
    )
    .unwrap();
    TopologyLoader::import(test_db.database_mut(), &updated).unwrap();

    let gateway = test_db.database().read_gateway("GW_01").unwrap().unwrap();
    assert_eq!(gateway.parameter(GatewayParameter::BatteryCharge), Some(17.5));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TopologyLoader::load_file(std::path::Path::new("/nonexistent/topology.toml"))
        .unwrap_err();
    assert!(matches!(err, sensor_reports::errors::AppError::Io(_)));
}
