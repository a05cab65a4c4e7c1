//! PostgreSQL database client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient` trait
//! for PostgreSQL databases using sqlx. One client wraps exactly one
//! connection, opened and verified for a single request.

use crate::config::ConnectionConfig;
use crate::db::materialize::{column_names, ensure_row_shape, ResultSetBuilder};
use crate::db::{DatabaseClient, QueryResult, Value};
use crate::error::{Result, SqlgateError};
use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::{Column as SqlxColumn, Connection, Executor, Row as SqlxRow, TypeInfo};
use std::time::Instant;
use tracing::{debug, warn};

/// PostgreSQL database client.
#[derive(Debug)]
pub struct PostgresClient {
    conn: Option<PgConnection>,
}

impl PostgresClient {
    /// Opens a connection and verifies it with a ping.
    ///
    /// Both failures collapse into the opaque connection error; the cause is
    /// only logged.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = config.pg_connect_options().map_err(|e| {
            warn!(error = %e, "Invalid PostgreSQL connection settings");
            SqlgateError::connection_unavailable()
        })?;

        let start = Instant::now();
        let mut conn = PgConnection::connect_with(&options).await.map_err(|e| {
            warn!(
                target_db = %config.display_string(),
                error = %e,
                "Failed to open PostgreSQL connection"
            );
            SqlgateError::connection_unavailable()
        })?;

        if let Err(e) = conn.ping().await {
            warn!(
                target_db = %config.display_string(),
                error = %e,
                "PostgreSQL connection failed liveness check"
            );
            // The socket may already be gone; dropping the connection is enough.
            let _ = conn.close().await;
            return Err(SqlgateError::connection_unavailable());
        }

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Connected to {}",
            config.display_string()
        );
        Ok(Self { conn: Some(conn) })
    }

    fn connection(&mut self) -> Result<&mut PgConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| SqlgateError::internal("PostgreSQL connection already closed"))
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let conn = self.connection()?;

        // Describing only prepares the statement, so the column list is known
        // even when no rows come back.
        let described = (&mut *conn)
            .describe(sql)
            .await
            .map_err(|e| SqlgateError::query(format_query_error(e)))?;
        let columns = column_names(described.columns());

        // The simple query protocol returns every value in text format, which
        // gives a textual fallback for types without a dedicated decoder.
        let rows: Vec<PgRow> = (&mut *conn)
            .fetch_all(sqlx::raw_sql(sql))
            .await
            .map_err(|e| SqlgateError::query(format_query_error(e)))?;

        let mut builder = ResultSetBuilder::with_capacity(columns, rows.len());
        for row in &rows {
            ensure_row_shape(row.columns(), builder.columns())?;
            builder.push_row(convert_row(row)?)?;
        }

        Ok(builder.finish())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| SqlgateError::internal(format!("Failed to close connection: {e}")))?;
        }
        Ok(())
    }
}

/// Decodes every cell of a PgRow.
fn convert_row(row: &PgRow) -> Result<Vec<Value>> {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Decodes a single cell, dispatching on the column's runtime type.
fn convert_value(row: &PgRow, index: usize) -> Result<Value> {
    let type_name = row.column(index).type_info().name().to_uppercase();

    let decoded = match type_name.as_str() {
        "BOOL" => row.try_get::<Option<bool>, _>(index).map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(index).map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index).map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index).map(Value::from),
        "FLOAT4" => row.try_get::<Option<f32>, _>(index).map(Value::from),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index).map(Value::from),
        "BYTEA" => row.try_get::<Option<Vec<u8>>, _>(index).map(Value::from),
        // Text, numeric, temporal, json, uuid and custom types keep the
        // server's textual rendering.
        _ => row
            .try_get_unchecked::<Option<String>, _>(index)
            .map(Value::from),
    };

    decoded.map_err(|e| {
        SqlgateError::query(format!(
            "Failed to decode column '{}' ({}): {}",
            row.column(index).name(),
            type_name,
            e
        ))
    })
}

/// Formats a query error with the PostgreSQL detail fields when available.
fn format_query_error(error: sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    let mut result = String::from("ERROR: ");
    result.push_str(db_error.message());

    if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
        if let Some(detail) = pg_error.detail() {
            result.push_str("\n  DETAIL: ");
            result.push_str(detail);
        }

        if let Some(hint) = pg_error.hint() {
            result.push_str("\n  HINT: ");
            result.push_str(hint);
        }

        if let Some(constraint) = pg_error.constraint() {
            result.push_str("\n  CONSTRAINT: ");
            result.push_str(constraint);
        }
    }

    result
}
