//! Shared application state.

use crate::connection::ConnectionProvisioner;
use std::sync::Arc;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<dyn ConnectionProvisioner>,
}

impl AppState {
    pub fn new(provisioner: Arc<dyn ConnectionProvisioner>) -> Self {
        Self { provisioner }
    }
}
