//! PostgreSQL query integration tests.
//!
//! Tests SQL query execution and result handling.

use super::common::get_pg_client;
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlgate::db::DatabaseClient;
use sqlgate::error::SqlgateError;

#[tokio::test]
async fn test_execute_simple_select() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 as num, 'hello' as greeting")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["num".to_string(), "greeting".to_string()]);
    assert_eq!(result.total(), 1);
    assert_eq!(result.rows()[0]["num"], json!(1));
    assert_eq!(result.rows()[0]["greeting"], json!("hello"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_columns_follow_select_order() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    client
        .execute_query("CREATE TEMP TABLE pair (a INT, b TEXT)")
        .await
        .unwrap();
    client
        .execute_query("INSERT INTO pair (a, b) VALUES (1, 'one'), (2, 'two')")
        .await
        .unwrap();

    let result = client
        .execute_query("SELECT b, a FROM pair ORDER BY a")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["b".to_string(), "a".to_string()]);
    assert_eq!(result.total(), 2);
    for row in result.rows() {
        assert_eq!(row.keys().collect::<Vec<_>>(), ["b", "a"]);
    }

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_zero_rows_keep_columns() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 AS id, 'x' AS label WHERE false")
        .await
        .unwrap();

    assert_eq!(result.total(), 0);
    assert!(result.rows().is_empty());
    assert_eq!(result.columns(), ["id".to_string(), "label".to_string()]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_insert_succeeds_with_empty_result() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    client
        .execute_query("CREATE TEMP TABLE t (x INT)")
        .await
        .unwrap();
    let result = client
        .execute_query("INSERT INTO t(x) VALUES (1)")
        .await
        .unwrap();

    assert!(result.columns().is_empty());
    assert!(result.rows().is_empty());
    assert_eq!(result.total(), 0);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_value_normalization() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query(
            "SELECT 'hello'::bytea AS payload, 42::int8 AS big, 1.5::float8 AS ratio, \
             true AS flag, NULL::text AS missing, 12.50::numeric AS amount",
        )
        .await
        .unwrap();

    let row = &result.rows()[0];
    assert_eq!(row["payload"], json!("hello"));
    assert_eq!(row["big"], json!(42));
    assert_eq!(row["ratio"], json!(1.5));
    assert_eq!(row["flag"], json!(true));
    assert_eq!(row["missing"], json!(null));
    // Arbitrary-precision numerics keep the server's rendering.
    assert_eq!(row["amount"], json!("12.50"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_syntax_error_does_not_affect_later_queries() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let error = client.execute_query("SELEC * FORM t").await.unwrap_err();
    assert!(matches!(error, SqlgateError::Query(_)));

    let result = client.execute_query("SELECT 2 AS two").await.unwrap();
    assert_eq!(result.rows()[0]["two"], json!(2));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_error_has_detail() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let error = client
        .execute_query("SELECT * FROM nonexistent_table_xyz")
        .await
        .unwrap_err();

    assert!(error.to_string().contains("nonexistent_table_xyz"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_column_names_keep_last_value() {
    let Some(mut client) = get_pg_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client.execute_query("SELECT 1 AS a, 2 AS a").await.unwrap();

    assert_eq!(result.columns(), ["a".to_string(), "a".to_string()]);
    assert_eq!(result.rows()[0].len(), 1);
    assert_eq!(result.rows()[0]["a"], json!(2));

    client.close().await.unwrap();
}
