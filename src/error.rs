use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::dispatch::{DispatchError, IneligibleReason};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("dispatch blocked: {0}")]
    Ineligible(IneligibleReason),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Ineligible(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": reason.to_string(), "reason": reason }),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            err @ DispatchError::NotFound { .. } => AppError::NotFound(err.to_string()),
            err @ DispatchError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            DispatchError::Ineligible(reason) => AppError::Ineligible(reason),
            DispatchError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::NotFound(err.to_string())
    }
}
