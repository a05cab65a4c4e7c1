//! Request handlers for the query and health endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use super::state::AppState;
use crate::db::QueryResult;
use crate::query::QueryExecutor;

/// Body of `POST /query`.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[tracing::instrument(level = "debug", skip(state, payload), err)]
pub async fn query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected query request body");
        ApiError::InvalidBody(rejection.body_text())
    })?;

    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidBody("query is empty".to_string()));
    }

    let result = QueryExecutor::new(state.provisioner.as_ref())
        .execute(&request.query)
        .await?;

    Ok(Json(result))
}

pub async fn health() -> Json<&'static str> {
    Json("OK")
}
