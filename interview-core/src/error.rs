//! Error types for interview-core

use std::time::Duration;

use thiserror::Error;

use crate::auth::AuthError;

/// Top-level error type for interview-core
#[derive(Error, Debug)]
pub enum InterviewError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Assessor error: {0}")]
    Assessor(#[from] AssessorError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors related to the session lifecycle
#[derive(Error, Debug)]
pub enum SessionError {
    /// Bad or empty input at session creation
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    /// Lifecycle misuse, e.g. advancing past the last question
    #[error("Invalid transition: cannot {action} ({reason})")]
    InvalidTransition { action: String, reason: String },

    /// Mutating event sent to a session that is no longer active
    #[error("Session is closed: status is {status}")]
    SessionClosed { status: String },

    #[error("Invalid question index {index}: session has {count} questions")]
    InvalidQuestion { index: usize, count: usize },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Report store failure; a failed finalize leaves the session Active
    #[error("Report store failure: {0}")]
    Finalize(#[from] StoreError),
}

/// Errors from the qualitative assessment collaborator
///
/// These never surface from finalize; callers fall back to deterministic
/// output and log them.
#[derive(Error, Debug)]
pub enum AssessorError {
    #[error("Assessor unavailable: {0}")]
    Unavailable(String),

    #[error("Assessor timed out after {0:?}")]
    Timeout(Duration),

    #[error("Assessor returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from report persistence
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
