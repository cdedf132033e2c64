use super::report::resolve_db_path;
use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::processor::{CsvProcessor, TopologyLoader};
use crate::types::ImportConfig;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Load topology or measurements into the database
#[derive(Args)]
pub struct ImportCommand {
    #[command(subcommand)]
    pub import_type: ImportCommands,
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import networks, gateways and sensors from a TOML file
    Topology {
        /// Topology TOML file
        #[arg(long)]
        file: PathBuf,

        /// Database path (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,
    },

    /// Import measurements from a CSV file
    Measurements {
        /// CSV file with network_code,gateway_code,sensor_code,value,timestamp
        #[arg(long)]
        csv: PathBuf,

        /// Database path (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Batch size for database inserts (overrides config.toml)
        #[arg(long)]
        batch_size: Option<usize>,
    },
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::load()?;

        match &self.import_type {
            ImportCommands::Topology {
                file,
                database_path,
            } => {
                let db_path = resolve_db_path(database_path, &app_config);
                let mut database = Database::new(&db_path)?;
                let topology = TopologyLoader::load_file(file)?;
                let stats = TopologyLoader::import(&mut database, &topology)?;
                println!(
                    "Imported {} networks, {} gateways, {} sensors",
                    stats.networks, stats.gateways, stats.sensors
                );
                Ok(())
            }
            ImportCommands::Measurements {
                csv,
                database_path,
                batch_size,
            } => {
                let config = ImportConfig {
                    csv_path: csv.clone(),
                    database_path: database_path
                        .clone()
                        .unwrap_or_else(|| app_config.database.default_path.clone()),
                    batch_size: batch_size.unwrap_or(app_config.processing.batch_size),
                };
                info!("Importing measurements from {}", config.csv_path.display());

                let mut processor = CsvProcessor::new(config)?;
                let stats = processor.process_csv()?;
                println!("{}", stats.summary());
                Ok(())
            }
        }
    }
}
