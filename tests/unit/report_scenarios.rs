//! End-to-end report scenarios over an in-memory store

use sensor_reports::analysis::{CalendarGranularity, Range, ReportEngine};
use sensor_reports::config::ReportingConfig;
use sensor_reports::database::{Database, ImportOperations};
use sensor_reports::errors::{AppError, EntityKind};
use sensor_reports::types::analysis_results::Report;

use crate::common::counting_store::CountingStore;
use crate::common::seeding::{seed_topology, series};
use chrono::TimeDelta;

fn seeded_store() -> Database {
    let mut db = Database::new(":memory:").unwrap();
    seed_topology(&mut db).unwrap();
    db
}

fn engine_over(db: Database) -> ReportEngine<CountingStore> {
    ReportEngine::with_store(CountingStore::new(db), ReportingConfig::default()).unwrap()
}

#[test]
fn test_unknown_network_fails_before_reading_measurements() {
    let engine = engine_over(seeded_store());

    let err = engine.get_network_report("NET_99", None, None).unwrap_err();
    assert!(matches!(
        err,
        AppError::ElementNotFound {
            kind: EntityKind::Network,
            ref code
        } if code == "NET_99"
    ));
    assert_eq!(engine.store().measurement_reads(), 0);
}

#[test]
fn test_unknown_gateway_and_sensor() {
    let engine = engine_over(seeded_store());

    assert!(engine
        .get_gateway_report("GW_99", None, None)
        .unwrap_err()
        .is_not_found());
    assert!(engine
        .get_sensor_report("S_99", None, None)
        .unwrap_err()
        .is_not_found());
    assert_eq!(engine.store().measurement_reads(), 0);
}

#[test]
fn test_validation_precedes_existence_check() {
    let engine = engine_over(seeded_store());

    let err = engine
        .get_network_report("NET_99", Some("2024-02-01 00:00:00"), Some("2024-01-01 00:00:00"))
        .unwrap_err();
    assert!(err.is_validation());

    let err = engine
        .get_sensor_report("S_01", Some("2024/01/01"), None)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(engine.store().measurement_reads(), 0);
}

#[test]
fn test_existing_entities_without_measurements() {
    let engine = engine_over(seeded_store());

    let network = engine
        .get_network_report("NET_01", Some("2024-01-01 00:00:00"), None)
        .unwrap();
    assert_eq!(network.number_of_measurements(), 0);
    assert!(network.histogram().is_empty());
    assert!(network.most_active_gateways().is_empty());
    assert!(network.gateways_load_ratio().is_empty());
    assert_eq!(network.start_date(), Some("2024-01-01 00:00:00"));
    assert_eq!(network.end_date(), None);

    let gateway = engine.get_gateway_report("GW_01", None, None).unwrap();
    assert_eq!(gateway.number_of_measurements(), 0);
    assert!(gateway.histogram().is_empty());
    assert_eq!(gateway.battery_charge_percentage(), Some(80.0));

    let sensor = engine.get_sensor_report("S_01", None, None).unwrap();
    assert_eq!(sensor.number_of_measurements(), 0);
    assert_eq!(sensor.mean(), 0.0);
    assert!(sensor.histogram().is_empty());
}

#[test]
fn test_sensor_report_single_bucket() {
    let mut db = seeded_store();
    db.insert_measurement_batch(&series("GW_01", "S_01", "2024-01-01 08:00:00", &[5.0, 5.0, 5.0]))
        .unwrap();
    let engine = engine_over(db);

    let report = engine.get_sensor_report("S_01", None, None).unwrap();
    let only = Range::closed(5.0, 5.0).unwrap();
    assert_eq!(report.histogram().len(), 1);
    assert_eq!(report.histogram().get(&only), Some(3));
    assert_eq!(engine.store().measurement_reads(), 1);
}

#[test]
fn test_gateway_two_measurements_ten_minutes_apart() {
    let mut db = seeded_store();
    let mut batch = series("GW_01", "S_01", "2024-01-01 08:00:00", &[20.0]);
    batch.extend(series("GW_01", "S_02", "2024-01-01 08:10:00", &[20.5]));
    db.insert_measurement_batch(&batch).unwrap();
    let engine = engine_over(db);

    let report = engine.get_gateway_report("GW_01", None, None).unwrap();
    let ten_minutes = Range::closed(TimeDelta::minutes(10), TimeDelta::minutes(10)).unwrap();
    assert_eq!(report.number_of_measurements(), 2);
    assert_eq!(report.histogram().len(), 1);
    assert_eq!(report.histogram().get(&ten_minutes), Some(1));
    assert_eq!(report.most_active_sensors().to_vec(), vec!["S_01", "S_02"]);
    assert!(report.outlier_sensors().is_empty());
}

#[test]
fn test_gateway_flags_sensor_far_from_expected_mean() {
    let mut db = seeded_store();
    let mut batch = series("GW_01", "S_01", "2024-01-01 08:00:00", &[20.0, 20.5, 19.5]);
    batch.extend(series("GW_01", "S_02", "2024-01-01 09:00:00", &[25.0, 26.0]));
    db.insert_measurement_batch(&batch).unwrap();
    let engine = engine_over(db);

    let report = engine.get_gateway_report("GW_01", None, None).unwrap();
    assert_eq!(report.outlier_sensors().to_vec(), vec!["S_02"]);
    assert_eq!(report.sensors_load_ratio()["S_01"], 0.6);
}

#[test]
fn test_network_report_window_and_ranking() {
    let mut db = seeded_store();
    let mut batch = series("GW_01", "S_01", "2024-01-01 10:00:00", &[1.0, 2.0, 3.0]);
    batch.extend(series("GW_02", "S_03", "2024-01-01 11:00:00", &[4.0]));
    batch.extend(series("GW_02", "S_03", "2024-01-05 11:00:00", &[5.0]));
    db.insert_measurement_batch(&batch).unwrap();
    let engine = engine_over(db);

    let report = engine
        .get_network_report("NET_01", Some("2024-01-01 09:30:00"), Some("2024-01-01 12:00:00"))
        .unwrap();

    assert_eq!(report.number_of_measurements(), 4);
    assert_eq!(report.most_active_gateways().to_vec(), vec!["GW_01"]);
    assert_eq!(report.least_active_gateways().to_vec(), vec!["GW_02"]);
    assert_eq!(report.gateways_load_ratio()["GW_01"], 0.75);
    assert_eq!(report.granularity(), Some(CalendarGranularity::Hourly));
    // [09:30, 10:00) [10:00, 11:00) [11:00, 12:00]
    let counts: Vec<u64> = report.histogram().iter().map(|(_, c)| c).collect();
    assert_eq!(counts, vec![0, 3, 1]);
}

#[test]
fn test_custom_reporting_settings() {
    let mut db = seeded_store();
    let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
    db.insert_measurement_batch(&series("GW_01", "S_01", "2024-01-01 00:00:00", &values))
        .unwrap();

    let settings = ReportingConfig {
        value_bucket_count: 5,
        ..ReportingConfig::default()
    };
    let engine = ReportEngine::with_store(db, settings).unwrap();

    let report = engine.get_sensor_report("S_01", None, None).unwrap();
    assert_eq!(report.histogram().len(), 5);
}

#[test]
fn test_invalid_settings_rejected() {
    let settings = ReportingConfig {
        outlier_sigma: 0.0,
        ..ReportingConfig::default()
    };
    assert!(ReportEngine::with_store(seeded_store(), settings).is_err());
}
