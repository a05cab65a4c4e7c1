//! Query execution for sqlgate.
//!
//! This module isolates the per-request statement lifecycle from the
//! HTTP layer.

pub mod executor;

pub use executor::QueryExecutor;
