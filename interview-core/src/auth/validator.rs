//! HS256 credential issuing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::{AuthConfig, AuthError, Credential, SessionClaims};

/// Issues and checks per-session bearer credentials
pub struct CredentialIssuer {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl CredentialIssuer {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a credential whose subject is `session_id`
    pub fn issue(&self, session_id: &str) -> Result<Credential, AuthError> {
        if self.config.secret.is_empty() {
            return Err(AuthError::Misconfigured("empty signing secret".to_string()));
        }
        let expires_at = Utc::now() + Duration::minutes(self.config.ttl_minutes);
        let claims = SessionClaims {
            sub: session_id.to_string(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(Credential::bearer(token, expires_at))
    }

    /// Validate signature and expiry, returning the session id it grants
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )?;
        Ok(data.claims.sub)
    }

    /// Validate the token and require that it was issued for `session_id`
    pub fn authorize(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        let subject = self.verify(token)?;
        if subject != session_id {
            return Err(AuthError::SessionMismatch {
                session_id: session_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::new(AuthConfig::new("test-secret"))
    }

    #[test]
    fn issued_token_verifies_to_session_id() {
        let issuer = issuer();
        let credential = issuer.issue("session-1").unwrap();

        assert_eq!(credential.token_type, "bearer");
        assert_eq!(issuer.verify(&credential.access_token).unwrap(), "session-1");
        assert!(issuer.authorize(&credential.access_token, "session-1").is_ok());
    }

    #[test]
    fn issue_refuses_empty_secret() {
        let issuer = CredentialIssuer::new(AuthConfig::new(""));
        assert!(matches!(
            issuer.issue("session-1"),
            Err(AuthError::Misconfigured(_))
        ));
    }

    #[test]
    fn expiry_follows_ttl() {
        let credential = issuer().issue("s").unwrap();
        let minutes = (credential.expires_at - Utc::now()).num_minutes();
        assert!((118..=120).contains(&minutes), "got {minutes}");
    }

    #[test]
    fn token_for_other_session_is_mismatch() {
        let issuer = issuer();
        let credential = issuer.issue("session-1").unwrap();

        let result = issuer.authorize(&credential.access_token, "session-2");
        assert!(matches!(result, Err(AuthError::SessionMismatch { .. })));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = CredentialIssuer::new(AuthConfig::new("other-secret"));
        let credential = other.issue("session-1").unwrap();

        let result = issuer().verify(&credential.access_token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(
            issuer().verify("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_token_is_missing() {
        assert!(matches!(issuer().verify(""), Err(AuthError::MissingToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = AuthConfig {
            ttl_minutes: -5,
            ..AuthConfig::new("test-secret")
        };
        let issuer = CredentialIssuer::new(config);
        let credential = issuer.issue("session-1").unwrap();

        assert!(matches!(
            issuer.verify(&credential.access_token),
            Err(AuthError::Expired)
        ));
    }
}
