//! OpenAI chat-completions assessor

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ollama::ChatMessage;
use super::traits::{AssessmentPrompt, QualitativeAssessor};
use crate::error::AssessorError;

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Assessor backed by the OpenAI chat-completions API
pub struct OpenAiAssessor {
    base_url: String,
    model: String,
    api_key: Option<String>,
    request_timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiAssessor {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            request_timeout,
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QualitativeAssessor for OpenAiAssessor {
    async fn assess(&self, prompt: &AssessmentPrompt) -> Result<String, AssessorError> {
        let Some(api_key) = &self.api_key else {
            return Err(AssessorError::Unavailable(
                "OPENAI_API_KEY is not configured".to_string(),
            ));
        };

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: ChatMessage::conversation(prompt),
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, "Dispatching prompt via provider=openai");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssessorError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssessorError::Unavailable(format!(
                "OpenAI API returned status {}",
                response.status()
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AssessorError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AssessorError::InvalidResponse("OpenAI response missing content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_unavailable_without_network() {
        let assessor = OpenAiAssessor::new(
            DEFAULT_OPENAI_BASE_URL,
            "gpt-4o-mini",
            None,
            Duration::from_secs(1),
        );
        let prompt = AssessmentPrompt::Answer {
            question: "Q".to_string(),
            transcript: "A".to_string(),
        };

        let result = assessor.assess(&prompt).await;
        assert!(matches!(result, Err(AssessorError::Unavailable(msg)) if msg.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let assessor = OpenAiAssessor::new(
            DEFAULT_OPENAI_BASE_URL,
            "gpt-4o-mini",
            Some(String::new()),
            Duration::from_secs(1),
        );
        assert!(assessor.api_key.is_none());
    }

    #[test]
    fn completions_url_joins_base() {
        let assessor = OpenAiAssessor::new(
            "https://proxy.internal/v1/",
            "gpt-4o-mini",
            None,
            Duration::from_secs(1),
        );
        assert_eq!(
            assessor.completions_url(),
            "https://proxy.internal/v1/chat/completions"
        );
    }

    #[test]
    fn request_carries_low_temperature() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
