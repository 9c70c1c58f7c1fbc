//! Unified error handling for the portal.
//!
//! Every error body is `{"message": "..."}`, the shape the client pipeline
//! extracts its display message from.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use nour_session::{AuthError, StoreError};

use crate::middleware::MessageKey;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Login failed or could not be persisted.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The persisted store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No session for the role the request needs.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::Store(_)) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Portal request error"
            );
        }

        // Don't expose internal error details to clients
        match &self {
            Self::Auth(e) => MessageKey(e.message_key()).response(status),
            Self::Store(_) => MessageKey("common.unexpected_error").response(status),
            Self::NotFound(m) | Self::Unauthorized(m) | Self::BadRequest(m) => {
                (status, Json(json!({ "message": m }))).into_response()
            }
        }
    }
}
