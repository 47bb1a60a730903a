//! Credential and claim types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer credential handed out when a session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn bearer(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_at,
        }
    }
}

/// JWT claims: the subject is the session id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
}
