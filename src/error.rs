//! Error types for sqlgate.
//!
//! Defines the main error enum used throughout the service.

use thiserror::Error;

/// Message returned for every connection failure. Driver details are logged, never surfaced.
pub const CONNECTION_UNAVAILABLE: &str = "database connection unavailable";

/// Main error type for sqlgate operations.
#[derive(Error, Debug)]
pub enum SqlgateError {
    /// The database could not be opened or failed its liveness check.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution, schema discovery or row decoding failed.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bind failures, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SqlgateError {
    /// Creates the opaque connection error handed to callers.
    pub fn connection_unavailable() -> Self {
        Self::Connection(CONNECTION_UNAVAILABLE.to_string())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using SqlgateError.
pub type Result<T> = std::result::Result<T, SqlgateError>;
