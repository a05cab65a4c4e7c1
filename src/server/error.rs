//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SqlgateError;

/// Errors produced while serving an HTTP request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Sqlgate(#[from] SqlgateError),
}

/// JSON body of every failure response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Sqlgate(SqlgateError::Connection(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Sqlgate(SqlgateError::Query(_))
            | Self::Sqlgate(SqlgateError::Config(_))
            | Self::Sqlgate(SqlgateError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Driver and connection details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "Invalid request body",
            Self::Sqlgate(SqlgateError::Connection(_)) => "Database connection unavailable",
            Self::Sqlgate(SqlgateError::Query(_)) => "Failed to execute SQL query",
            Self::Sqlgate(SqlgateError::Config(_)) | Self::Sqlgate(SqlgateError::Internal(_)) => {
                "Internal server error"
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.public_message().to_string(),
        });
        (self.status_code(), body).into_response()
    }
}
