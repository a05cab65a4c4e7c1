//! sqlgate - run SQL over HTTP and get JSON rows back.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use sqlgate::cli::Cli;
use sqlgate::config::{Config, ConnectionConfig};
use sqlgate::connection::ConfigProvisioner;
use sqlgate::error::{Result, SqlgateError};
use sqlgate::logging;
use sqlgate::server::{self, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse_args();

    match &cli.log_file {
        Some(path) => {
            if let Err(e) = logging::init_file_logging(path) {
                eprintln!("{}: {}", e.category(), e);
                std::process::exit(1);
            }
        }
        None => logging::init_stderr_logging(),
    }

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_server_overrides(&mut config.server);

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        anyhow!("No database connection configured. Use --help for usage information.")
    })?;
    connection
        .validate()
        .context("Invalid database connection settings")?;
    info!("Connection: {}", connection.display_string());

    let provisioner = ConfigProvisioner::new(Arc::new(connection));
    let state = AppState::new(Arc::new(provisioner));

    server::serve(&config.server, state)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// A full connection string replaces the file entry; individual flags are
/// merged on top of it. Environment variables only fill what is still unset.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    let mut connection = match cli.connection_name() {
        Some(name) => Some(config.get_connection(Some(name)).cloned().ok_or_else(|| {
            SqlgateError::config(format!("Connection '{name}' not found in config file"))
        })?),
        None => config.get_connection(None).cloned(),
    };

    if let Some(from_cli) = cli.to_connection_config()? {
        match connection.as_mut() {
            Some(base) if cli.connection_string.is_none() => base.merge(&from_cli),
            _ => connection = Some(from_cli),
        }
    }

    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
    }

    Ok(connection)
}
