use std::fmt;
use thiserror::Error;

/// Kind of monitored entity a report is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Network,
    Gateway,
    Sensor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Network => "Network",
            EntityKind::Gateway => "Gateway",
            EntityKind::Sensor => "Sensor",
        };
        f.write_str(name)
    }
}

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed caller input (bad date, inverted range, blank code)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested network/gateway/sensor does not exist in the store
    #[error("{kind} not found: {code}")]
    ElementNotFound { kind: EntityKind, code: String },

    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored or imported data that cannot be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl AppError {
    pub fn not_found(kind: EntityKind, code: &str) -> Self {
        AppError::ElementNotFound {
            kind,
            code: code.to_string(),
        }
    }

    /// Bad input supplied by the caller
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Requested entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ElementNotFound { .. })
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::InvalidData(format!("TOML error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
