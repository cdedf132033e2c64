//! SQLite persistence for the sensor topology and measurements.
//!
//! ## Architecture
//!
//! The `Database` struct implements the store traits directly:
//! - `MeasurementStore` - measurement reads used by the report engine
//! - `EntityStore` - network, gateway and sensor lookups
//! - `ImportOperations` - writes used by the CSV and topology importers

pub mod helpers;
mod operations;
pub mod schema;
pub mod traits;

pub use schema::setup_schema;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// SQLite-backed store
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) the database at `database_path` and initialise the schema
    ///
    /// `:memory:` gives a private in-memory store.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
