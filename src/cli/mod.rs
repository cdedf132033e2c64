use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Sensor network report engine
#[derive(Parser)]
#[command(name = "sensor-reports")]
#[command(about = "Retrospective reports over collected sensor measurements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a network, gateway or sensor report
    Report(commands::report::ReportCommand),
    /// Import topology or measurements
    Import(commands::import::ImportCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(command) => command.run(),
        Commands::Import(command) => command.run(),
    }
}
