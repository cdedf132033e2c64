//! CLI smoke test
//!
//! Seeds an on-disk database, then renders every report kind through the
//! same code path the `report` subcommand uses, in both output formats.

use sensor_reports::cli::commands::report::{
    load_config, render_gateway, render_network, render_sensor, FormatArg, ReportArgs,
};
use sensor_reports::config::AppConfig;
use sensor_reports::database::ImportOperations;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

use crate::common::database::TestDatabase;
use crate::common::seeding::{seed_topology, series};

fn populated_db() -> TestDatabase {
    let mut test_db = TestDatabase::new("cli_smoke").unwrap();
    seed_topology(test_db.database_mut()).unwrap();

    let mut batch = series("GW_01", "S_01", "2024-03-01 06:00:00", &[20.0, 20.2, 19.8, 35.0]);
    batch.extend(series("GW_01", "S_02", "2024-03-01 07:00:00", &[21.0, 21.5]));
    batch.extend(series("GW_02", "S_03", "2024-03-03 07:00:00", &[18.0]));
    test_db.database_mut().insert_measurement_batch(&batch).unwrap();
    test_db
}

fn args(test_db: &TestDatabase, code: &str, format: FormatArg) -> ReportArgs {
    ReportArgs {
        code: code.to_string(),
        start: None,
        end: None,
        database_path: Some(PathBuf::from(test_db.path())),
        format,
        output: None,
    }
}

#[test]
fn test_console_reports_render() {
    let test_db = populated_db();
    let config = AppConfig::default();

    let network = render_network(&args(&test_db, "NET_01", FormatArg::Console), &config).unwrap();
    assert!(network.contains("=== NETWORK REPORT: NET_01 ==="));
    assert!(network.contains("Most active gateways:  GW_01"));
    assert!(network.contains("Bucket granularity:    daily"));

    let gateway = render_gateway(&args(&test_db, "GW_01", FormatArg::Console), &config).unwrap();
    assert!(gateway.contains("Battery charge:       80.0%"));

    let sensor = render_sensor(&args(&test_db, "S_01", FormatArg::Console), &config).unwrap();
    assert!(sensor.contains("=== SENSOR REPORT: S_01 ==="));
    assert!(sensor.contains("=== HISTOGRAM ==="));
}

#[test]
fn test_json_reports_parse() {
    let test_db = populated_db();
    let config = AppConfig::default();

    let network = render_network(&args(&test_db, "NET_01", FormatArg::Json), &config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&network).unwrap();
    assert_eq!(json["code"], "NET_01");
    assert_eq!(json["number_of_measurements"], 7);
    let buckets = json["histogram"].as_array().unwrap();
    assert!(!buckets.is_empty());
    assert_eq!(buckets.last().unwrap()["end_inclusive"], true);

    let gateway = render_gateway(&args(&test_db, "GW_01", FormatArg::Json), &config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&gateway).unwrap();
    assert_eq!(json["battery_charge_percentage"], 80.0);
    assert_eq!(json["outlier_sensors"], serde_json::json!(["S_01"]));
}

#[test]
fn test_unknown_code_surfaces_not_found() {
    let test_db = populated_db();
    let err = render_sensor(
        &args(&test_db, "S_404", FormatArg::Console),
        &AppConfig::default(),
    )
    .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Sensor not found: S_404");
}

#[test]
#[serial]
fn test_invalid_reporting_override_aborts_report() {
    env::set_var("SENSOR_REPORTS_REPORTING__VALUE_BUCKET_COUNT", "0");
    let zero_buckets = load_config();
    env::remove_var("SENSOR_REPORTS_REPORTING__VALUE_BUCKET_COUNT");
    assert!(zero_buckets.unwrap_err().is_validation());

    env::set_var("SENSOR_REPORTS_REPORTING__OUTLIER_SIGMA", "-1");
    let negative_sigma = load_config();
    env::remove_var("SENSOR_REPORTS_REPORTING__OUTLIER_SIGMA");
    assert!(negative_sigma.unwrap_err().is_validation());
}

#[test]
#[serial]
fn test_config_without_overrides_loads() {
    let config = load_config().unwrap();
    assert_eq!(config.reporting.value_bucket_count, 20);
}
