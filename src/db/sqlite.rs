//! SQLite database client implementation.
//!
//! Mirrors `PostgresClient` for SQLite files and in-memory databases.
//! SQLite is dynamically typed, so cells are decoded by the storage class
//! of each value rather than the declared column type.

use crate::config::ConnectionConfig;
use crate::db::materialize::{column_names, ensure_row_shape, ResultSetBuilder};
use crate::db::{DatabaseClient, QueryResult, Value};
use crate::error::{Result, SqlgateError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{
    Column as SqlxColumn, Connection, Executor, Row as SqlxRow, Statement, TypeInfo, ValueRef,
};
use tracing::{debug, warn};

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    conn: Option<SqliteConnection>,
}

impl SqliteClient {
    /// Opens the database file and verifies the connection with a ping.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = config.sqlite_connect_options().map_err(|e| {
            warn!(error = %e, "Invalid SQLite connection settings");
            SqlgateError::connection_unavailable()
        })?;

        let mut conn = SqliteConnection::connect_with(&options).await.map_err(|e| {
            warn!(
                target_db = %config.display_string(),
                error = %e,
                "Failed to open SQLite database"
            );
            SqlgateError::connection_unavailable()
        })?;

        if let Err(e) = conn.ping().await {
            warn!(
                target_db = %config.display_string(),
                error = %e,
                "SQLite connection failed liveness check"
            );
            let _ = conn.close().await;
            return Err(SqlgateError::connection_unavailable());
        }

        debug!("Opened {}", config.display_string());
        Ok(Self { conn: Some(conn) })
    }

    fn connection(&mut self) -> Result<&mut SqliteConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| SqlgateError::internal("SQLite connection already closed"))
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let conn = self.connection()?;

        // Only compiles the statement. SQLite cannot re-prepare DDL once it
        // has run, so this happens before execution.
        let prepared = (&mut *conn)
            .prepare(sql)
            .await
            .map_err(|e| SqlgateError::query(e.to_string()))?;
        let columns = column_names(prepared.columns());

        let rows: Vec<SqliteRow> = (&mut *conn)
            .fetch_all(sqlx::raw_sql(sql))
            .await
            .map_err(|e| SqlgateError::query(e.to_string()))?;

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
                .map_err(|e| SqlgateError::internal(format!("Failed to close database: {e}")))?;
        }
        Ok(())
    }
}

fn convert_row(row: &SqliteRow) -> Result<Vec<Value>> {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

fn convert_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let decode_error = |e: sqlx::Error| {
        SqlgateError::query(format!(
            "Failed to decode column '{}': {}",
            row.column(index).name(),
            e
        ))
    };

    let (is_null, storage_class) = {
        let raw = row.try_get_raw(index).map_err(decode_error)?;
        (raw.is_null(), raw.type_info().name().to_uppercase())
    };
    if is_null {
        return Ok(Value::Null);
    }

    let decoded = match storage_class.as_str() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(index).map(Value::from),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(Value::from),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(Value::from),
        _ => row.try_get_unchecked::<String, _>(index).map(Value::from),
    };

    decoded.map_err(decode_error)
}
