//! Mock assessor for offline use and testing
//!
//! Without scripted replies MockAssessor answers like a placeholder model:
//! flat 4s for answers and a canned summary. Tests script replies or
//! failures with `queue_reply()` / `queue_failure()` and assert on the call
//! counters.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::traits::{AssessmentPrompt, QualitativeAssessor};
use crate::error::AssessorError;

/// Canned grading reply
pub const MOCK_GRADE_REPLY: &str = r#"{"clarity":4,"relevance":4,"structure":4,"conciseness":4,"confidence":4,"commentary":"Mock evaluation. Configure an LLM provider for real grading."}"#;

/// Canned summary reply
pub const MOCK_SUMMARY_REPLY: &str =
    "Mock response: provide a valid LLM provider for richer insights.";

enum Scripted {
    Reply(String),
    Failure(String),
}

/// Scriptable implementation of QualitativeAssessor
#[derive(Default)]
pub struct MockAssessor {
    answer_script: Mutex<VecDeque<Scripted>>,
    summary_script: Mutex<VecDeque<Scripted>>,
    fail_all: bool,
    calls: AtomicUsize,
    summary_calls: AtomicUsize,
}

impl MockAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An assessor whose every call fails, as when the provider is down
    pub fn unavailable() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Queue the reply for the next answer-grading call
    pub fn queue_reply(&self, reply: impl Into<String>) {
        push(&self.answer_script, Scripted::Reply(reply.into()));
    }

    /// Queue a failure for the next answer-grading call
    pub fn queue_failure(&self, message: impl Into<String>) {
        push(&self.answer_script, Scripted::Failure(message.into()));
    }

    /// Queue the reply for the next summary call
    pub fn queue_summary(&self, reply: impl Into<String>) {
        push(&self.summary_script, Scripted::Reply(reply.into()));
    }

    /// Queue a failure for the next summary call
    pub fn queue_summary_failure(&self, message: impl Into<String>) {
        push(&self.summary_script, Scripted::Failure(message.into()));
    }

    /// Total number of `assess` calls
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of overall-summary calls
    pub fn summary_call_count(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

fn push(script: &Mutex<VecDeque<Scripted>>, entry: Scripted) {
    if let Ok(mut queue) = script.lock() {
        queue.push_back(entry);
    }
}

fn pop(script: &Mutex<VecDeque<Scripted>>) -> Option<Scripted> {
    script.lock().ok().and_then(|mut queue| queue.pop_front())
}

#[async_trait]
impl QualitativeAssessor for MockAssessor {
    async fn assess(&self, prompt: &AssessmentPrompt) -> Result<String, AssessorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.is_summary() {
            self.summary_calls.fetch_add(1, Ordering::SeqCst);
        }

        if self.fail_all {
            return Err(AssessorError::Unavailable(
                "mock assessor configured as unavailable".to_string(),
            ));
        }

        let script = if prompt.is_summary() {
            &self.summary_script
        } else {
            &self.answer_script
        };

        match pop(script) {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Failure(message)) => Err(AssessorError::Unavailable(message)),
            None if prompt.is_summary() => Ok(MOCK_SUMMARY_REPLY.to_string()),
            None => Ok(MOCK_GRADE_REPLY.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer() -> AssessmentPrompt {
        AssessmentPrompt::Answer {
            question: "Q".to_string(),
            transcript: "A".to_string(),
        }
    }

    fn summary() -> AssessmentPrompt {
        AssessmentPrompt::Summary {
            session_id: "s1".to_string(),
            entries: vec![],
        }
    }

    #[tokio::test]
    async fn default_replies_are_canned() {
        let mock = MockAssessor::new();
        assert_eq!(mock.assess(&answer()).await.unwrap(), MOCK_GRADE_REPLY);
        assert_eq!(mock.assess(&summary()).await.unwrap(), MOCK_SUMMARY_REPLY);
    }

    #[tokio::test]
    async fn scripted_replies_are_consumed_in_order() {
        let mock = MockAssessor::new();
        mock.queue_reply("first");
        mock.queue_failure("boom");

        assert_eq!(mock.assess(&answer()).await.unwrap(), "first");
        assert!(matches!(
            mock.assess(&answer()).await,
            Err(AssessorError::Unavailable(msg)) if msg == "boom"
        ));
        assert_eq!(mock.assess(&answer()).await.unwrap(), MOCK_GRADE_REPLY);
    }

    #[tokio::test]
    async fn summary_script_is_separate_from_answer_script() {
        let mock = MockAssessor::new();
        mock.queue_summary("overall fine");

        assert_eq!(mock.assess(&answer()).await.unwrap(), MOCK_GRADE_REPLY);
        assert_eq!(mock.assess(&summary()).await.unwrap(), "overall fine");
    }

    #[tokio::test]
    async fn counters_track_calls() {
        let mock = MockAssessor::new();
        mock.assess(&answer()).await.unwrap();
        mock.assess(&answer()).await.unwrap();
        mock.assess(&summary()).await.unwrap();

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.summary_call_count(), 1);
    }

    #[tokio::test]
    async fn unavailable_mock_always_fails_but_still_counts() {
        let mock = MockAssessor::unavailable();
        assert!(mock.assess(&summary()).await.is_err());
        assert_eq!(mock.summary_call_count(), 1);
    }
}
