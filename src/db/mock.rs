//! Mock database clients for testing.
//!
//! Provide in-memory `DatabaseClient` implementations that record how
//! often they are closed, so release on every exit path can be asserted.

use super::{DatabaseClient, QueryResult, Row};
use crate::error::{Result, SqlgateError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock database client that returns predefined results.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    result: Option<QueryResult>,
    stall: bool,
    closes: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl MockDatabaseClient {
    /// Creates a mock that answers SELECT statements with a single echo row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers every statement with `result`.
    pub fn with_result(result: QueryResult) -> Self {
        let mut client = Self::default();
        client.result = Some(result);
        client
    }

    /// Creates a mock whose statements never complete.
    pub fn stalled() -> Self {
        let mut client = Self::default();
        client.stall = true;
        client
    }

    /// Counts calls to `close` in the given counter.
    pub fn with_close_counter(mut self, closes: Arc<AtomicUsize>) -> Self {
        self.closes = closes;
        self
    }

    /// Counts drops of the client in the given counter.
    pub fn with_drop_counter(mut self, drops: Arc<AtomicUsize>) -> Self {
        self.drops = drops;
        self
    }
}

impl Drop for MockDatabaseClient {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        if self.stall {
            std::future::pending::<()>().await;
        }

        if let Some(result) = &self.result {
            return Ok(result.clone());
        }

        if sql.trim_start().to_uppercase().starts_with("SELECT") {
            let mut row = Row::new();
            row.insert(
                "result".to_string(),
                serde_json::Value::String(format!("Mock result for: {sql}")),
            );
            Ok(QueryResult::new(vec!["result".to_string()], vec![row]))
        } else {
            // Statements without a projection report no columns.
            Ok(QueryResult::default())
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A database client whose every statement fails.
#[derive(Debug)]
pub struct FailingDatabaseClient {
    message: String,
    closes: Arc<AtomicUsize>,
}

impl FailingDatabaseClient {
    /// Creates a client that fails with the given query error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            closes: Arc::default(),
        }
    }

    /// Counts calls to `close` in the given counter.
    pub fn with_close_counter(mut self, closes: Arc<AtomicUsize>) -> Self {
        self.closes = closes;
        self
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&mut self, _sql: &str) -> Result<QueryResult> {
        Err(SqlgateError::query(self.message.clone()))
    }

    async fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
