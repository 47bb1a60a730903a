//! Server error types and their HTTP mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use interview_core::{AuthError, SessionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Error returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Session(e) => match e {
                SessionError::Config(_)
                | SessionError::InvalidQuestion { .. }
                | SessionError::InvalidEvent(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SessionError::InvalidTransition { .. } | SessionError::SessionClosed { .. } => {
                    StatusCode::CONFLICT
                }
                SessionError::NotFound(_) => StatusCode::NOT_FOUND,
                SessionError::Finalize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(AuthError::Jwt(_) | AuthError::Misconfigured(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(e) if e.is_forbidden() => StatusCode::FORBIDDEN,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Session(e) => match e {
                SessionError::Config(_) => "CONFIG_ERROR",
                SessionError::NotFound(_) => "NOT_FOUND",
                SessionError::InvalidTransition { .. } => "INVALID_TRANSITION",
                SessionError::SessionClosed { .. } => "SESSION_CLOSED",
                SessionError::InvalidQuestion { .. } => "INVALID_QUESTION",
                SessionError::InvalidEvent(_) => "INVALID_EVENT",
                SessionError::Finalize(_) => "INTERNAL_ERROR",
            },
            Self::Auth(AuthError::Jwt(_) | AuthError::Misconfigured(_)) => "INTERNAL_ERROR",
            Self::Auth(e) if e.is_forbidden() => "FORBIDDEN",
            Self::Auth(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, Json(self.to_body())).into_response()
    }
}
