//! Connection integration tests.
//!
//! Tests database connectivity and error handling.

use super::common::{get_pg_client, SqliteFixture};
use sqlgate::config::ConnectionConfig;
use sqlgate::connection::{ConfigProvisioner, ConnectionProvisioner};
use sqlgate::db::{DatabaseBackend, DatabaseClient, PostgresClient};
use sqlgate::error::SqlgateError;
use sqlgate::query::QueryExecutor;
use std::sync::Arc;

#[tokio::test]
async fn test_connect_with_valid_credentials() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    // Connection succeeded if we got here
    client.close().await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn test_connect_with_invalid_host() {
    let config = ConnectionConfig {
        host: Some("invalid.host.that.does.not.exist.local".to_string()),
        port: 5432,
        database: Some("testdb".to_string()),
        user: Some("testuser".to_string()),
        password: Some("testpass".to_string()),
        sslmode: Some("disable".to_string()),
        ..Default::default()
    };

    let error = PostgresClient::connect(&config).await.unwrap_err();
    assert!(matches!(error, SqlgateError::Connection(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn test_unreachable_database_executes_nothing() {
    let config = ConnectionConfig {
        host: Some("127.0.0.1".to_string()),
        // Nothing listens on port 1.
        port: 1,
        database: Some("testdb".to_string()),
        sslmode: Some("disable".to_string()),
        ..Default::default()
    };
    let provisioner = ConfigProvisioner::new(Arc::new(config));

    let error = QueryExecutor::new(&provisioner)
        .execute("INSERT INTO audit_log VALUES (1)")
        .await
        .unwrap_err();

    assert!(matches!(error, SqlgateError::Connection(_)));
    assert!(!error.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn test_missing_sqlite_file_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.db");
    let config = ConnectionConfig {
        backend: DatabaseBackend::Sqlite,
        database: Some(path.display().to_string()),
        ..Default::default()
    };

    let error = ConfigProvisioner::new(Arc::new(config))
        .provision()
        .await
        .err()
        .unwrap();

    assert!(matches!(error, SqlgateError::Connection(_)));
    // The file must not be created as a side effect.
    assert!(!path.exists());
}

#[tokio::test]
async fn test_connections_are_not_shared_between_requests() {
    let fixture = SqliteFixture::new(&["CREATE TABLE t (x INTEGER)"]).await;
    let provisioner = ConfigProvisioner::new(Arc::new(fixture.config.clone()));
    let executor = QueryExecutor::new(&provisioner);

    // A transaction left open by one request dies with its connection.
    executor.execute("BEGIN").await.unwrap();
    executor.execute("INSERT INTO t (x) VALUES (1)").await.unwrap();

    // Had the insert joined the open transaction it would be invisible here.
    let mut observer = fixture.client().await;
    let result = observer.execute_query("SELECT x FROM t").await.unwrap();
    assert_eq!(result.total(), 1);
    observer.close().await.unwrap();
}
