//! Report data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attention::AttentionSummary;
use crate::scoring::ScoreCard;
use crate::session::Question;

/// One question's entry in the final report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionReport {
    pub index: usize,
    pub question: String,
    pub transcript: String,
    /// Session-wide attention, attached identically to every entry
    pub attention: AttentionSummary,
    pub scores: ScoreCard,
}

/// The immutable result of finalizing a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub session_id: String,
    pub summary: String,
    pub questions: Vec<QuestionReport>,
    pub attention: AttentionSummary,
    pub finalized_at: DateTime<Utc>,
}

impl Report {
    /// Sum of all question totals
    pub fn overall_total(&self) -> u32 {
        self.questions.iter().map(|q| q.scores.total as u32).sum()
    }
}

/// Everything the finalizer needs, captured from the session when it
/// enters `Finalizing`
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeInput {
    pub session_id: String,
    pub answers: Vec<(Question, String)>,
    pub attention: AttentionSummary,
}
