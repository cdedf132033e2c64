use crate::database::{Database, EntityStore, ImportOperations};
use crate::errors::{AppError, AppResult};
use crate::types::{ImportConfig, ImportStats, Measurement, MeasurementRecord};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::{debug, info, warn};

/// CSV processor loading collected measurements into the store
///
/// Rows that cannot be parsed, or whose codes do not match a registered
/// network/gateway/sensor chain, are logged and counted but never abort the
/// import. Topology must be loaded first (see [`super::TopologyLoader`]).
pub struct CsvProcessor {
    config: ImportConfig,
    database: Database,
    // sensor code -> (gateway code, network code); None for unknown sensors
    topology: HashMap<String, Option<(String, String)>>,
}

impl CsvProcessor {
    /// Create a new CSV processor, opening the configured database
    pub fn new(config: ImportConfig) -> AppResult<Self> {
        let database = Database::new(&config.database_path.to_string_lossy())?;
        Self::with_database(config, database)
    }

    /// Create a processor over an already-open database
    pub fn with_database(config: ImportConfig, database: Database) -> AppResult<Self> {
        if config.batch_size == 0 {
            return Err(AppError::Validation(
                "batch size must be at least 1".to_string(),
            ));
        }

        info!("CSV Processor initialised");
        info!("Source CSV: {}", config.csv_path.display());
        info!("Batch size: {}", config.batch_size);

        Ok(Self {
            config,
            database,
            topology: HashMap::new(),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Process the configured CSV file
    pub fn process_csv(&mut self) -> AppResult<ImportStats> {
        let file = File::open(&self.config.csv_path)?;
        self.process_reader(BufReader::new(file))
    }

    /// Process CSV content from any reader
    pub fn process_reader<R: Read>(&mut self, reader: R) -> AppResult<ImportStats> {
        info!("Starting CSV processing");
        let mut stats = ImportStats::new();

        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut batch: Vec<Measurement> = Vec::with_capacity(self.config.batch_size);

        for (row_index, result) in csv_reader.deserialize::<MeasurementRecord>().enumerate() {
            stats.total_rows += 1;

            let measurement = match result
                .map_err(AppError::Csv)
                .and_then(|record| record.to_measurement())
            {
                Ok(measurement) => measurement,
                Err(e) => {
                    warn!("Skipping malformed row {}: {}", row_index + 1, e);
                    stats.malformed += 1;
                    continue;
                }
            };

            if !self.matches_topology(&measurement)? {
                warn!(
                    "Skipping row {}: sensor {} is not registered under {}/{}",
                    row_index + 1,
                    measurement.sensor_code,
                    measurement.network_code,
                    measurement.gateway_code
                );
                stats.unknown_topology += 1;
                continue;
            }

            batch.push(measurement);
            if batch.len() >= self.config.batch_size {
                self.flush(&mut batch, &mut stats)?;
            }
        }

        if !batch.is_empty() {
            self.flush(&mut batch, &mut stats)?;
        }

        stats.finish();
        info!("CSV processing complete. {}", stats.summary());
        Ok(stats)
    }

    fn flush(&mut self, batch: &mut Vec<Measurement>, stats: &mut ImportStats) -> AppResult<()> {
        stats.imported += self.database.insert_measurement_batch(batch)?;
        stats.batches_processed += 1;
        debug!("Batch {} committed", stats.batches_processed);
        batch.clear();
        Ok(())
    }

    /// Sensor exists and belongs to the row's gateway and network
    fn matches_topology(&mut self, measurement: &Measurement) -> AppResult<bool> {
        if !self.topology.contains_key(&measurement.sensor_code) {
            let owners = match self.database.read_sensor(&measurement.sensor_code)? {
                Some(sensor) => self
                    .database
                    .read_gateway(&sensor.gateway_code)?
                    .map(|gateway| (gateway.code, gateway.network_code)),
                None => None,
            };
            self.topology
                .insert(measurement.sensor_code.clone(), owners);
        }

        Ok(matches!(
            self.topology.get(&measurement.sensor_code),
            Some(Some((gateway, network)))
                if *gateway == measurement.gateway_code && *network == measurement.network_code
        ))
    }
}
