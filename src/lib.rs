//! sqlgate - run SQL over HTTP and get JSON rows back.
//!
//! This library exposes the core modules for the binary and for integration tests.

pub mod cli;
pub mod config;
pub mod connection;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod server;
