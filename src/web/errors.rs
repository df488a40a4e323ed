//! Web API error types and their HTTP response conversions.
//!
//! Leverages thiserror for the error taxonomy and Axum's `IntoResponse` for
//! the mapping to the wire contract: 400 carries the per-field violation
//! list, 404 and 500 carry a single `error` message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::StoreError;
use crate::validation::{FieldViolation, ValidationError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Item não encontrado")]
    NotFound,

    #[error("validation failed")]
    Validation { violations: Vec<FieldViolation> },

    #[error("store failure: {message}")]
    Store { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            violations: err.violations,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Item não encontrado" })),
            )
                .into_response(),
            ApiError::Validation { violations } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": violations })),
            )
                .into_response(),
            ApiError::Store { message } => {
                tracing::error!(error = %message, "store failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
