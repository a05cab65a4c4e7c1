//! Row accumulation shared by the database backends.

use super::{QueryResult, Row, Value};
use crate::error::{Result, SqlgateError};
use sqlx::Column;

/// Accumulates decoded rows against a fixed column list.
#[derive(Debug)]
pub(crate) struct ResultSetBuilder {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultSetBuilder {
    pub fn with_capacity(columns: Vec<String>, capacity: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Normalizes one decoded row and appends it. The row must have one value per column.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(SqlgateError::query(format!(
                "row has {} values but the result declares {} columns",
                values.len(),
                self.columns.len()
            )));
        }

        let row: Row = self
            .columns
            .iter()
            .cloned()
            .zip(values.into_iter().map(Value::normalize))
            .collect();
        self.rows.push(row);
        Ok(())
    }

    pub fn finish(self) -> QueryResult {
        QueryResult::new(self.columns, self.rows)
    }
}

/// Collects the names of driver columns, preserving order.
pub(crate) fn column_names<C: Column>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|col| col.name().to_string()).collect()
}

/// Fails if a fetched row does not have the shape discovered for the statement.
pub(crate) fn ensure_row_shape<C: Column>(columns: &[C], expected: &[String]) -> Result<()> {
    let matches = columns.len() == expected.len()
        && columns
            .iter()
            .zip(expected)
            .all(|(col, name)| col.name() == name);

    if matches {
        Ok(())
    } else {
        Err(SqlgateError::query(format!(
            "statement returned rows with columns [{}] but described [{}]",
            column_names(columns).join(", "),
            expected.join(", ")
        )))
    }
}
