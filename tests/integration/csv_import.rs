//! Measurement CSV import followed by report queries

use sensor_reports::analysis::ReportEngine;
use sensor_reports::config::ReportingConfig;
use sensor_reports::database::{Database, ImportOperations};
use sensor_reports::processor::CsvProcessor;
use sensor_reports::types::analysis_results::Report;
use sensor_reports::types::ImportConfig;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::common::create_unique_test_db_path;
use crate::common::seeding::seed_topology;

const MEASUREMENTS: &str = "\
# sensor dump
network_code,gateway_code,sensor_code,value,timestamp
NET_01,GW_01,S_01,20.1,2024-01-01 00:00:00
NET_01,GW_01,S_01,19.9,2024-01-01 00:15:00
NET_01,GW_01,S_02,20.4,2024-01-01 00:30:00
NET_01,GW_02,S_03,18.0,2024-01-01 00:45:00
NET_01,GW_02,S_03,oops,2024-01-01 01:00:00
NET_01,GW_01,S_03,18.0,2024-01-01 01:15:00
";

fn write_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(MEASUREMENTS.as_bytes()).unwrap();
    file
}

#[test]
fn test_import_then_report() {
    let db_path = create_unique_test_db_path("csv_import");
    {
        let mut db = Database::new(&db_path).unwrap();
        seed_topology(&mut db).unwrap();
    }

    let csv = write_csv();
    let config = ImportConfig {
        csv_path: csv.path().to_path_buf(),
        database_path: PathBuf::from(&db_path),
        batch_size: 3,
    };
    let mut processor = CsvProcessor::new(config).unwrap();
    let stats = processor.process_csv().unwrap();

    assert_eq!(stats.total_rows, 6);
    assert_eq!(stats.imported, 4);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.unknown_topology, 1);
    assert_eq!(processor.database().count_measurements().unwrap(), 4);
    drop(processor);

    let engine = ReportEngine::new(&db_path, ReportingConfig::default()).unwrap();
    let network = engine.get_network_report("NET_01", None, None).unwrap();
    assert_eq!(network.number_of_measurements(), 4);
    assert_eq!(network.most_active_gateways().to_vec(), vec!["GW_01"]);
    assert_eq!(network.gateways_load_ratio()["GW_02"], 0.25);

    let sensor = engine
        .get_sensor_report("S_01", Some("2024-01-01 00:00:00"), Some("2024-01-01 00:15:00"))
        .unwrap();
    assert_eq!(sensor.number_of_measurements(), 2);
    assert!((sensor.mean() - 20.0).abs() < 1e-9);

    let _ = std::fs::remove_file(&db_path);
}

#[test]
fn test_missing_csv_is_io_error() {
    let config = ImportConfig {
        csv_path: PathBuf::from("/nonexistent/measurements.csv"),
        database_path: PathBuf::from(":memory:"),
        batch_size: 10,
    };
    let mut processor = CsvProcessor::new(config).unwrap();
    assert!(matches!(
        processor.process_csv().unwrap_err(),
        sensor_reports::errors::AppError::Io(_)
    ));
}
