use crate::analysis::{OutputFormat, ReportEngine, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

// ===== Helper Functions =====

/// Load configuration; an unreadable file or invalid reporting settings abort the command
pub fn load_config() -> AppResult<AppConfig> {
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");
    Ok(config)
}

/// Database path from CLI argument or config
pub(crate) fn resolve_db_path(cli_path: &Option<PathBuf>, app_config: &AppConfig) -> String {
    cli_path
        .as_ref()
        .unwrap_or(&app_config.database.default_path)
        .to_string_lossy()
        .to_string()
}

/// Write output to file with safe directory creation
fn write_output_to_file(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("Report written to: {}", path.display());
    Ok(())
}

// ===== Command Definitions =====

/// Output format accepted on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Console,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Console => OutputFormat::Console,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Options shared by every report kind
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Network, gateway or sensor code
    #[arg(long)]
    pub code: String,

    /// Window start, `yyyy-MM-dd HH:mm:ss` (inclusive)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end, `yyyy-MM-dd HH:mm:ss` (inclusive)
    #[arg(long)]
    pub end: Option<String>,

    /// Database path (overrides config.toml)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Console)]
    pub format: FormatArg,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Build a report for a network, gateway or sensor
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub report_type: ReportCommands,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Gateway activity, load ratios and calendar histogram of a network
    Network(ReportArgs),
    /// Sensor activity, outlier sensors, battery and inter-arrival histogram of a gateway
    Gateway(ReportArgs),
    /// Statistics, outliers and value histogram of a sensor
    Sensor(ReportArgs),
}

impl ReportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config()?;
        let (args, rendered) = match &self.report_type {
            ReportCommands::Network(args) => (args, render_network(args, &app_config)?),
            ReportCommands::Gateway(args) => (args, render_gateway(args, &app_config)?),
            ReportCommands::Sensor(args) => (args, render_sensor(args, &app_config)?),
        };

        match &args.output {
            Some(path) => write_output_to_file(path, &rendered),
            None => {
                print!("{}", rendered);
                Ok(())
            }
        }
    }
}

fn open_engine(args: &ReportArgs, app_config: &AppConfig) -> AppResult<ReportEngine> {
    let db_path = resolve_db_path(&args.database_path, app_config);
    ReportEngine::new(&db_path, app_config.reporting.clone())
}

pub fn render_network(args: &ReportArgs, app_config: &AppConfig) -> AppResult<String> {
    let engine = open_engine(args, app_config)?;
    let report =
        engine.get_network_report(&args.code, args.start.as_deref(), args.end.as_deref())?;
    ReportFormatter::format_network_report(&report, &args.format.into())
}

pub fn render_gateway(args: &ReportArgs, app_config: &AppConfig) -> AppResult<String> {
    let engine = open_engine(args, app_config)?;
    let report =
        engine.get_gateway_report(&args.code, args.start.as_deref(), args.end.as_deref())?;
    ReportFormatter::format_gateway_report(&report, &args.format.into())
}

pub fn render_sensor(args: &ReportArgs, app_config: &AppConfig) -> AppResult<String> {
    let engine = open_engine(args, app_config)?;
    let report =
        engine.get_sensor_report(&args.code, args.start.as_deref(), args.end.as_deref())?;
    ReportFormatter::format_sensor_report(&report, &args.format.into())
}
