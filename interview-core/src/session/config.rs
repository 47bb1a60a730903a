//! Session tuning knobs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration applied to every new session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Countdown for each question, in seconds
    #[serde(default = "default_answer_time_limit_secs")]
    pub answer_time_limit_secs: u64,

    /// Upper bound for each assessor call made during finalize, in seconds
    #[serde(default = "default_assessor_timeout_secs")]
    pub assessor_timeout_secs: u64,
}

fn default_answer_time_limit_secs() -> u64 {
    120
}

fn default_assessor_timeout_secs() -> u64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            answer_time_limit_secs: default_answer_time_limit_secs(),
            assessor_timeout_secs: default_assessor_timeout_secs(),
        }
    }
}

impl SessionConfig {
    pub fn answer_time_limit(&self) -> Duration {
        Duration::from_secs(self.answer_time_limit_secs)
    }

    pub fn assessor_timeout(&self) -> Duration {
        Duration::from_secs(self.assessor_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.answer_time_limit(), Duration::from_secs(120));
        assert_eq!(config.assessor_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: SessionConfig = toml::from_str("assessor_timeout_secs = 5").unwrap();
        assert_eq!(config.assessor_timeout_secs, 5);
        assert_eq!(config.answer_time_limit_secs, 120);
    }
}
