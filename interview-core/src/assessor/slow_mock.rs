//! Slow mock assessor for timeout and concurrency testing
//!
//! SlowMockAssessor wraps MockAssessor and sleeps before every reply.

use std::time::Duration;

use async_trait::async_trait;

use super::mock::MockAssessor;
use super::traits::{AssessmentPrompt, QualitativeAssessor};
use crate::error::AssessorError;

/// MockAssessor wrapper that adds configurable delay
pub struct SlowMockAssessor {
    inner: MockAssessor,
    delay: Duration,
}

impl SlowMockAssessor {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockAssessor::new(),
            delay,
        }
    }

    /// The wrapped mock, for scripting and call counts
    pub fn inner(&self) -> &MockAssessor {
        &self.inner
    }
}

#[async_trait]
impl QualitativeAssessor for SlowMockAssessor {
    async fn assess(&self, prompt: &AssessmentPrompt) -> Result<String, AssessorError> {
        tokio::time::sleep(self.delay).await;
        self.inner.assess(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor::assess_with_timeout;
    use std::time::Instant;

    fn summary() -> AssessmentPrompt {
        AssessmentPrompt::Summary {
            session_id: "s1".to_string(),
            entries: vec![],
        }
    }

    #[tokio::test]
    async fn assess_delays_by_configured_duration() {
        let assessor = SlowMockAssessor::new(Duration::from_millis(50));

        let start = Instant::now();
        assessor.assess(&summary()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(assessor.inner().summary_call_count(), 1);
    }

    #[tokio::test]
    async fn timeout_shorter_than_delay_fails_with_timeout() {
        let assessor = SlowMockAssessor::new(Duration::from_millis(200));

        let result = assess_with_timeout(&assessor, &summary(), Duration::from_millis(20)).await;

        assert!(matches!(result, Err(AssessorError::Timeout(_))));
    }
}
