//! Qualitative assessment collaborator (the LLM)
//!
//! Provider selection mirrors deployment: `mock` for development and tests,
//! `ollama` for a local model, `openai` for the hosted API.

pub mod mock;
pub mod ollama;
pub mod openai;
pub mod slow_mock;
pub mod traits;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use mock::MockAssessor;
pub use ollama::{DEFAULT_OLLAMA_HOST, OllamaAssessor};
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiAssessor};
pub use slow_mock::SlowMockAssessor;
pub use traits::{AssessmentPrompt, QualitativeAssessor, SummaryEntry, assess_with_timeout};

/// Which assessor implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssessorProvider {
    #[default]
    Mock,
    Ollama,
    OpenAi,
}

impl AssessorProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
        }
    }
}

/// Configuration for the qualitative assessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessorConfig {
    #[serde(default)]
    pub provider: AssessorProvider,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Usually supplied through the `OPENAI_API_KEY` environment variable
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    /// Upper bound for a single HTTP request to the provider
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

fn default_ollama_host() -> String {
    DEFAULT_OLLAMA_HOST.to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            provider: AssessorProvider::default(),
            openai_model: default_openai_model(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            ollama_model: default_ollama_model(),
            ollama_host: default_ollama_host(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AssessorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Build the configured assessor
pub fn from_config(config: &AssessorConfig) -> Arc<dyn QualitativeAssessor> {
    info!(provider = config.provider.as_str(), "Configuring qualitative assessor");
    match config.provider {
        AssessorProvider::Mock => Arc::new(MockAssessor::new()),
        AssessorProvider::Ollama => Arc::new(OllamaAssessor::new(
            config.ollama_host.clone(),
            config.ollama_model.clone(),
            config.request_timeout(),
        )),
        AssessorProvider::OpenAi => Arc::new(OpenAiAssessor::new(
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.openai_api_key.clone(),
            config.request_timeout(),
        )),
    }
}
