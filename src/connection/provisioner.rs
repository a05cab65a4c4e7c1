//! Per-request connection provisioning.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseClient};
use crate::error::Result;

/// Yields a fresh, verified connection for each request.
#[async_trait]
pub trait ConnectionProvisioner: Send + Sync {
    /// Opens a connection and checks that it is live.
    ///
    /// Fails with `SqlgateError::Connection` when the database cannot be
    /// reached; the caller owns the returned client and must close it.
    async fn provision(&self) -> Result<Box<dyn DatabaseClient>>;
}

/// Provisions connections from the process-wide connection configuration.
#[derive(Debug, Clone)]
pub struct ConfigProvisioner {
    config: Arc<ConnectionConfig>,
}

impl ConfigProvisioner {
    /// Creates a provisioner for the given configuration.
    pub fn new(config: Arc<ConnectionConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConnectionProvisioner for ConfigProvisioner {
    async fn provision(&self) -> Result<Box<dyn DatabaseClient>> {
        debug!(
            backend = self.config.backend.as_str(),
            "Provisioning connection to {}",
            self.config.display_string()
        );
        db::connect(&self.config).await
    }
}
