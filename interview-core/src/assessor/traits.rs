//! QualitativeAssessor trait and prompt types
//!
//! The assessor is the LLM collaborator. It is optional by contract: every
//! caller has a deterministic fallback and must not block on it beyond a
//! timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AssessorError;
use crate::scoring::ScoreCard;

/// System message sent to chat-style providers
pub const SYSTEM_PROMPT: &str = "You are an expert interview evaluator.";

/// One question's outcome, as fed into the overall summary prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub question: String,
    pub scores: ScoreCard,
}

/// What the assessor is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentPrompt {
    /// Grade a single answer; the reply is expected to be JSON
    Answer { question: String, transcript: String },
    /// Summarize the whole session; the reply is plain text
    Summary {
        session_id: String,
        entries: Vec<SummaryEntry>,
    },
}

impl AssessmentPrompt {
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary { .. })
    }

    /// Render the user message sent to the model
    pub fn render(&self) -> String {
        match self {
            Self::Answer {
                question,
                transcript,
            } => format!(
                "Grade this interview answer on clarity, relevance, structure, conciseness, confidence. \
                 Return JSON with scores 1-5 per metric and a short commentary.\n\
                 Question: {question}\nAnswer: {transcript}"
            ),
            Self::Summary {
                session_id,
                entries,
            } => {
                let feedback = serde_json::to_string(entries).unwrap_or_default();
                format!(
                    "Generate a concise interview summary paragraph referencing overall performance \
                     and key strengths/areas.\nReturn plain text.\n\
                     Candidate session {session_id} received the following feedback: {feedback}.\n\
                     Produce a 3 sentence summary."
                )
            }
        }
    }
}

/// Capability interface for qualitative (LLM) assessment
#[async_trait]
pub trait QualitativeAssessor: Send + Sync {
    /// Produce the model's raw reply for a prompt
    async fn assess(&self, prompt: &AssessmentPrompt) -> Result<String, AssessorError>;
}

/// Run an assessment bounded by `timeout`
///
/// Elapsed time is reported as [`AssessorError::Timeout`] so a slow
/// collaborator is handled exactly like an unavailable one.
pub async fn assess_with_timeout(
    assessor: &dyn QualitativeAssessor,
    prompt: &AssessmentPrompt,
    timeout: Duration,
) -> Result<String, AssessorError> {
    match tokio::time::timeout(timeout, assessor.assess(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(AssessorError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_includes_question_and_transcript() {
        let prompt = AssessmentPrompt::Answer {
            question: "Tell me about yourself.".to_string(),
            transcript: "I build backend systems.".to_string(),
        };
        let text = prompt.render();
        assert!(text.starts_with("Grade this interview answer"));
        assert!(text.contains("Question: Tell me about yourself."));
        assert!(text.contains("Answer: I build backend systems."));
        assert!(!prompt.is_summary());
    }

    #[test]
    fn summary_prompt_embeds_scores_as_json() {
        let prompt = AssessmentPrompt::Summary {
            session_id: "abc".to_string(),
            entries: vec![SummaryEntry {
                question: "Q1".to_string(),
                scores: ScoreCard::new(2, 4, 4, 5, 4),
            }],
        };
        let text = prompt.render();
        assert!(text.contains("Candidate session abc"));
        assert!(text.contains("\"clarity\":2"));
        assert!(text.contains("\"total\":19"));
        assert!(prompt.is_summary());
    }

    #[test]
    fn prompt_serializes_with_kind_tag() {
        let prompt = AssessmentPrompt::Answer {
            question: "Q".to_string(),
            transcript: "A".to_string(),
        };
        let json = serde_json::to_string(&prompt).unwrap();
        assert!(json.contains("\"kind\":\"answer\""));
    }
}
