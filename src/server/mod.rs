//! HTTP surface for sqlgate.
//!
//! Exposes `POST /query` and maps executor failures onto distinct HTTP
//! statuses. Everything below the handler is transport-agnostic.

pub mod error;
pub mod handlers;
pub mod layers;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use handlers::QueryRequest;
pub use router::{create_router, make_app};
pub use state::AppState;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, SqlgateError};

/// Binds the configured address and serves until a shutdown signal arrives.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = make_app(state, config)?;

    let listener = TcpListener::bind(&config.listen)
        .await
        .map_err(|e| SqlgateError::internal(format!("Failed to bind {}: {e}", config.listen)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| SqlgateError::internal(format!("Failed to read local address: {e}")))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SqlgateError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => warn!("Ctrl+C received, starting graceful shutdown"),
        () = terminate => warn!("SIGTERM received, starting graceful shutdown"),
    }
}
