//! Query result types for sqlgate.
//!
//! Defines the decoded cell value, its JSON normalization, and the
//! `QueryResult` returned to callers.

use serde::Serialize;

/// A row of normalized values keyed by column name, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Represents the result of executing a SQL statement.
///
/// Built once by [`QueryResult::new`] and never mutated; `total` always
/// equals `rows.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    total: usize,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a result from column names and fully materialized rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            total: rows.len(),
            columns,
            rows,
        }
    }

    /// Number of rows in the result.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Column names in the order the database reported them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in the order the database returned them.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// A single cell decoded from the driver before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Raw byte sequence.
    Bytes(Vec<u8>),
}

impl Value {
    /// Converts the decoded value into its JSON-safe form.
    ///
    /// Byte sequences become strings (lossy UTF-8); every other variant
    /// passes through. Non-finite floats have no JSON number form and are
    /// rendered as text.
    pub fn normalize(self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Value::String(s) => serde_json::Value::String(s),
            Value::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(&b).into_owned()),
        }
    }
}

// Conversion implementations for the types the drivers decode into
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
