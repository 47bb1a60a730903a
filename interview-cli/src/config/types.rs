use std::collections::BTreeMap;

use interview_core::{AssessorConfig, AuthConfig, ScoringRules, SessionConfig, StorageConfig};
use serde::{Deserialize, Serialize};

/// Default port for the interview server
pub const DEFAULT_PORT: u16 = 8000;
/// Default host for the interview server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration as stored in TOML files (with optional fields for merging)
///
/// `server` and `auth` merge field by field. The remaining sections are
/// replaced whole by the last layer that declares them; their own serde
/// defaults fill whatever that layer leaves out.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawInterviewConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub auth: RawAuthConfig,

    pub session: Option<SessionConfig>,

    pub scoring: Option<ScoringRules>,

    pub assessor: Option<AssessorConfig>,

    pub storage: Option<StorageConfig>,

    /// Extra or replacement question profiles, merged by name
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<String>>,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
}

/// Auth config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAuthConfig {
    pub secret: Option<String>,
    pub ttl_minutes: Option<i64>,
    pub leeway_seconds: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InterviewConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub scoring: ScoringRules,

    #[serde(default)]
    pub assessor: AssessorConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port for the interview server
    pub port: u16,

    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: default_allowed_origins(),
        }
    }
}

pub fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}
