//! Authentication error types

use thiserror::Error;

/// Errors that can occur while checking a session credential
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was provided with the request
    #[error("no authentication token provided")]
    MissingToken,

    /// The token is malformed or its signature does not verify
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token has expired")]
    Expired,

    /// The token is valid but bound to a different session
    #[error("token does not grant access to session {session_id}")]
    SessionMismatch { session_id: String },

    /// The issuer cannot sign with its current configuration
    #[error("credential issuer misconfigured: {0}")]
    Misconfigured(String),

    /// Failure while signing a token
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Mismatch is an authorization failure; everything else means the
    /// caller is not authenticated
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::SessionMismatch { .. })
    }
}
