//! Ollama-backed assessor
//!
//! Talks to a local Ollama instance through its non-streaming `/api/chat`
//! endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{AssessmentPrompt, QualitativeAssessor, SYSTEM_PROMPT};
use crate::error::AssessorError;

/// Default Ollama API base URL
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub(crate) fn conversation(prompt: &AssessmentPrompt) -> Vec<Self> {
        vec![
            Self {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            Self {
                role: "user".to_string(),
                content: prompt.render(),
            },
        ]
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<ChatMessage>,
    /// Some OpenAI-compatible Ollama builds answer in this shape instead
    #[serde(default)]
    choices: Vec<OllamaChoice>,
}

#[derive(Debug, Deserialize)]
struct OllamaChoice {
    message: ChatMessage,
}

impl OllamaChatResponse {
    fn into_content(self) -> Option<String> {
        self.message
            .map(|m| m.content)
            .or_else(|| self.choices.into_iter().next().map(|c| c.message.content))
            .filter(|content| !content.is_empty())
    }
}

/// Assessor backed by a local Ollama model
pub struct OllamaAssessor {
    base_url: String,
    model: String,
    request_timeout: Duration,
    client: reqwest::Client,
}

impl OllamaAssessor {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            request_timeout,
            client: reqwest::Client::new(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QualitativeAssessor for OllamaAssessor {
    async fn assess(&self, prompt: &AssessmentPrompt) -> Result<String, AssessorError> {
        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages: ChatMessage::conversation(prompt),
            stream: false,
        };

        debug!(model = %self.model, "Dispatching prompt via provider=ollama");

        let response = self
            .client
            .post(self.chat_url())
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssessorError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssessorError::Unavailable(format!(
                "Ollama API returned status {}",
                response.status()
            )));
        }

        let body: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AssessorError::InvalidResponse(e.to_string()))?;

        body.into_content().ok_or_else(|| {
            AssessorError::InvalidResponse("Ollama response missing content".to_string())
        })
    }
}
