//! Database abstraction layer for sqlgate.
//!
//! Provides a trait-based interface for database operations, allowing
//! different database backends to be used interchangeably.

mod materialize;
mod mock;
mod postgres;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use sqlite::SqliteClient;
pub use types::{QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Returns the backend as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Opens and verifies a connection for the given configuration.
///
/// This is the single entry point used by the connection provisioner; every
/// failure is reported as an opaque `SqlgateError::Connection`.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let client = PostgresClient::connect(config).await?;
            Ok(Box::new(client))
        }
        DatabaseBackend::Sqlite => {
            let client = SqliteClient::connect(config).await?;
            Ok(Box::new(client))
        }
    }
}

/// A single live database connection.
///
/// Clients are owned by one request. `close` releases the connection
/// gracefully; dropping an unclosed client still closes the underlying
/// socket or file handle.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Executes one SQL statement and materializes its full result.
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult>;

    /// Closes the connection. Calling it again is a no-op.
    async fn close(&mut self) -> Result<()>;
}
