//! Bearer credential extraction for axum

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use interview_core::{AuthError, CredentialIssuer};

/// The bearer token sent with a request, if any
///
/// Extraction never fails; handlers call [`BearerToken::authorize`] once
/// they know which session the request targets.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    /// Require a valid credential bound to `session_id`
    pub fn authorize(&self, issuer: &CredentialIssuer, session_id: &str) -> Result<(), AuthError> {
        let token = self.0.as_deref().ok_or(AuthError::MissingToken)?;
        issuer.authorize(token, session_id)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_from_headers(&parts.headers)))
    }
}
