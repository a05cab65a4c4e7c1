//! Per-request query execution.
//!
//! Acquires a connection, runs one statement, and releases the connection
//! on every exit path.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::connection::ConnectionProvisioner;
use crate::db::QueryResult;
use crate::error::Result;

/// Runs caller-supplied statements on freshly provisioned connections.
pub struct QueryExecutor<'a> {
    provisioner: &'a dyn ConnectionProvisioner,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(provisioner: &'a dyn ConnectionProvisioner) -> Self {
        Self { provisioner }
    }

    /// Executes `sql` exactly once and returns its fully materialized result.
    ///
    /// A connection failure returns before anything is executed. The
    /// connection is closed after both success and failure; if this future is
    /// dropped mid-flight, dropping the client closes it instead.
    pub async fn execute(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let mut client = self.provisioner.provision().await.inspect_err(|e| {
            warn!(category = e.category(), "Connection unavailable, query not attempted");
        })?;
        debug!(sql, "Connection acquired, executing statement");

        let result = client.execute_query(sql).await;

        if let Err(e) = client.close().await {
            warn!(error = %e, "Failed to close connection cleanly");
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(query_result) => info!(
                rows = query_result.total(),
                columns = query_result.columns().len(),
                elapsed_ms,
                "Query executed"
            ),
            Err(e) => warn!(category = e.category(), error = %e, elapsed_ms, "Query failed"),
        }

        result
    }
}
