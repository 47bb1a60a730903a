//! Turns a frozen session snapshot into a persisted report

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::store::ReportStore;
use super::types::{FinalizeInput, QuestionReport, Report};
use crate::assessor::{AssessmentPrompt, SummaryEntry, assess_with_timeout};
use crate::error::StoreError;
use crate::scoring::ScoringEngine;

/// Summary used when the assessor is unavailable or replies with nothing
pub const FALLBACK_SUMMARY: &str =
    "Automated summary unavailable. Review the detailed scores above.";

/// Scores every answer, asks once for an overall summary, and persists
pub struct ReportFinalizer {
    engine: ScoringEngine,
    store: Arc<dyn ReportStore>,
}

impl ReportFinalizer {
    pub fn new(engine: ScoringEngine, store: Arc<dyn ReportStore>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// Build and persist the report
    ///
    /// Assessor failures degrade to heuristic scores and the fallback
    /// summary; only a store failure is an error.
    pub async fn finalize(&self, input: FinalizeInput) -> Result<Report, StoreError> {
        let mut questions = Vec::with_capacity(input.answers.len());
        for (question, transcript) in &input.answers {
            let scored = self
                .engine
                .score_enriched(&question.prompt, transcript, &input.attention)
                .await;
            questions.push(QuestionReport {
                index: question.index,
                question: question.prompt.clone(),
                transcript: transcript.clone(),
                attention: scored.attention,
                scores: scored.scores,
            });
        }

        let summary = self.summarize(&input.session_id, &questions).await;

        let report = Report {
            session_id: input.session_id,
            summary,
            questions,
            attention: input.attention,
            finalized_at: Utc::now(),
        };

        self.store.save(&report).await?;
        info!(
            session_id = %report.session_id,
            questions = report.questions.len(),
            "Report finalized"
        );
        Ok(report)
    }

    async fn summarize(&self, session_id: &str, questions: &[QuestionReport]) -> String {
        let prompt = AssessmentPrompt::Summary {
            session_id: session_id.to_string(),
            entries: questions
                .iter()
                .map(|q| SummaryEntry {
                    question: q.question.clone(),
                    scores: q.scores.clone(),
                })
                .collect(),
        };

        match assess_with_timeout(
            self.engine.assessor().as_ref(),
            &prompt,
            self.engine.timeout(),
        )
        .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(session_id, "Assessor returned an empty summary");
                FALLBACK_SUMMARY.to_string()
            }
            Err(e) => {
                warn!(session_id, "Summary generation failed: {}", e);
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}
