use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::ErrorResponse;

pub const NOT_FOUND_MESSAGE: &str = "Highlight not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("NotFound: {0}")]
    NotFound(String),
    #[error("LockError: {0}")]
    LockError(String),
}

/// Errors surfaced by HTTP handlers. Only the fixed message reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Highlight not found")]
    NotFound,
    #[error("Internal Server Error")]
    Internal(#[source] StoreError),
    /// Unreadable request body. Reported like any other unhandled failure.
    #[error("Internal Server Error")]
    InvalidBody(#[from] JsonRejection),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => tracing::error!("request failed: {}", crate::unpack_error(e)),
            ApiError::InvalidBody(e) => tracing::warn!("rejected request body: {}", e.body_text()),
            ApiError::NotFound => {}
        }
        error_response(self.status(), &self.to_string())
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("RequestError: {0}")]
    Request(#[from] reqwest::Error),
    #[error("StatusError: {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
