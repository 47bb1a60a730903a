//! Configuration for session credentials

use serde::{Deserialize, Serialize};

/// Secret shipped for local development only
pub const DEV_SECRET: &str = "dev-secret-change-me";

/// Configuration for HS256 session credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret, usually supplied through `INTERVIEW_JWT_SECRET`
    #[serde(default = "default_secret", skip_serializing)]
    pub secret: String,

    /// Credential lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Clock skew leeway in seconds for expiry validation
    #[serde(default)]
    pub leeway_seconds: u64,
}

fn default_secret() -> String {
    DEV_SECRET.to_string()
}

fn default_ttl_minutes() -> i64 {
    120
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            ttl_minutes: default_ttl_minutes(),
            leeway_seconds: 0,
        }
    }
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// True while the development secret is still in place
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }

    /// Check if the config is usable
    pub fn is_valid(&self) -> bool {
        !self.secret.is_empty() && self.ttl_minutes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_dev_secret_and_two_hours() {
        let config = AuthConfig::default();
        assert!(config.uses_dev_secret());
        assert_eq!(config.ttl_minutes, 120);
        assert!(config.is_valid());
    }

    #[test]
    fn empty_secret_is_invalid() {
        assert!(!AuthConfig::new("").is_valid());
    }

    #[test]
    fn deserialize_toml_keeps_default_ttl() {
        let toml = r#"
            secret = "s3cret"
        "#;
        let config: AuthConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.ttl_minutes, 120);
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn secret_is_never_serialized() {
        let json = serde_json::to_string(&AuthConfig::new("s3cret")).unwrap();
        assert!(!json.contains("s3cret"));
    }
}
