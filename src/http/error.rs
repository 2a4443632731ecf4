//! HTTP error mapping.

use crate::error::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

const INTERNAL_MESSAGE: &str = "An error occurred while processing your request.";

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid data: {errors}")]
    InvalidData { errors: serde_json::Value },

    #[error("missing required feedback fields")]
    MissingFeedbackFields,

    #[error("email already registered")]
    AlreadyRegistered,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidData { .. } | ApiError::MissingFeedbackFields => {
                StatusCode::BAD_REQUEST
            }
            ApiError::AlreadyRegistered => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidData { errors } => json!({
                "message": "Invalid data provided",
                "errors": errors,
            }),
            ApiError::MissingFeedbackFields => json!({
                "message": "Missing required fields. Please provide name, email, category, and message.",
            }),
            ApiError::AlreadyRegistered => json!({
                "message": "This email is already registered.",
            }),
            ApiError::NotFound(what) => json!({
                "message": format!("{} not found", what),
            }),
            ApiError::Store(_) | ApiError::Internal(_) => {
                error!(error = %self, "request failed");
                json!({ "message": INTERNAL_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}
