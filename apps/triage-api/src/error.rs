//! API error type and its HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common_db::error::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, format!("validation failed: {}", errors))
            }
            ApiError::PatientNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("patient not found: {}", id))
            }
            ApiError::Database(e) => {
                error!("database failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            ApiError::Internal(e) => {
                error!("internal failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
