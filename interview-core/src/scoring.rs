//! Rubric scoring
//!
//! The deterministic formula is canonical: it is what live displays show
//! and what tests pin. Assessor enrichment adds commentary and, only when
//! `accept_assessor_scores` is set, replaces sub-scores.
//!
//! With default rules, for a transcript of `w` words:
//!
//! | sub-score   | value                                            |
//! |-------------|--------------------------------------------------|
//! | clarity     | `clamp(ceil(w / 8), 1, 5)`                       |
//! | relevance   | 4                                                |
//! | structure   | 4                                                |
//! | conciseness | 5 if `w <= 120`, else `max(1, 5 - ceil((w - 120) / 40))` |
//! | confidence  | 4                                                |

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::assessor::{AssessmentPrompt, QualitativeAssessor, assess_with_timeout};
use crate::attention::AttentionSummary;

pub const MIN_SUBSCORE: u8 = 1;
pub const MAX_SUBSCORE: u8 = 5;

/// Rubric for one answer; `total` is always the sum of the five sub-scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub clarity: u8,
    pub relevance: u8,
    pub structure: u8,
    pub conciseness: u8,
    pub confidence: u8,
    pub total: u8,
    #[serde(default)]
    pub commentary: Option<String>,
}

impl ScoreCard {
    /// Build a card, clamping each sub-score into [1, 5]
    pub fn new(clarity: u8, relevance: u8, structure: u8, conciseness: u8, confidence: u8) -> Self {
        let mut card = Self {
            clarity: clamp_subscore(clarity),
            relevance: clamp_subscore(relevance),
            structure: clamp_subscore(structure),
            conciseness: clamp_subscore(conciseness),
            confidence: clamp_subscore(confidence),
            total: 0,
            commentary: None,
        };
        card.recompute_total();
        card
    }

    fn recompute_total(&mut self) {
        self.total =
            self.clarity + self.relevance + self.structure + self.conciseness + self.confidence;
    }
}

fn clamp_subscore(value: u8) -> u8 {
    value.clamp(MIN_SUBSCORE, MAX_SUBSCORE)
}

/// Constants of the deterministic formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Words needed per clarity point
    #[serde(default = "default_words_per_clarity_point")]
    pub words_per_clarity_point: u32,

    /// Longest answer that still earns full conciseness
    #[serde(default = "default_concise_word_limit")]
    pub concise_word_limit: u32,

    /// Extra words beyond the limit that cost one conciseness point
    #[serde(default = "default_overflow_words_per_point")]
    pub overflow_words_per_point: u32,

    /// Value for relevance, structure and confidence
    #[serde(default = "default_baseline")]
    pub baseline: u8,

    /// Let assessor-provided sub-scores replace the deterministic ones
    #[serde(default)]
    pub accept_assessor_scores: bool,
}

fn default_words_per_clarity_point() -> u32 {
    8
}

fn default_concise_word_limit() -> u32 {
    120
}

fn default_overflow_words_per_point() -> u32 {
    40
}

fn default_baseline() -> u8 {
    4
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            words_per_clarity_point: default_words_per_clarity_point(),
            concise_word_limit: default_concise_word_limit(),
            overflow_words_per_point: default_overflow_words_per_point(),
            baseline: default_baseline(),
            accept_assessor_scores: false,
        }
    }
}

impl ScoringRules {
    /// Deterministic scorecard for a transcript
    pub fn score(&self, transcript: &str) -> ScoreCard {
        let words = transcript.split_whitespace().count() as u32;

        let clarity = words.div_ceil(self.words_per_clarity_point.max(1));
        let conciseness = if words <= self.concise_word_limit {
            MAX_SUBSCORE as u32
        } else {
            let overflow = words - self.concise_word_limit;
            let penalty = overflow.div_ceil(self.overflow_words_per_point.max(1));
            (MAX_SUBSCORE as u32).saturating_sub(penalty)
        };

        ScoreCard::new(
            clarity.min(MAX_SUBSCORE as u32) as u8,
            self.baseline,
            self.baseline,
            conciseness as u8,
            self.baseline,
        )
    }
}

/// A scorecard together with the attention context it was produced under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub scores: ScoreCard,
    pub attention: AttentionSummary,
}

/// Pure scoring entry point; attention is carried, never scored
pub fn score(transcript: &str, attention: &AttentionSummary, rules: &ScoringRules) -> ScoredAnswer {
    ScoredAnswer {
        scores: rules.score(transcript),
        attention: *attention,
    }
}

/// Shape of a grading reply; every field is optional
#[derive(Debug, Default, Deserialize)]
struct GradeReply {
    clarity: Option<Value>,
    relevance: Option<Value>,
    structure: Option<Value>,
    conciseness: Option<Value>,
    confidence: Option<Value>,
    commentary: Option<String>,
    summary: Option<String>,
}

/// Round a loosely typed score and clamp it into [1, 5]
fn normalize_subscore(value: Option<&Value>) -> Option<u8> {
    let raw = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(MIN_SUBSCORE as f64, MAX_SUBSCORE as f64) as u8)
}

/// Pull the JSON object out of a reply that may be wrapped in prose or fences
fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// Scoring with optional assessor enrichment
pub struct ScoringEngine {
    rules: ScoringRules,
    assessor: Arc<dyn QualitativeAssessor>,
    timeout: Duration,
}

impl ScoringEngine {
    pub fn new(
        rules: ScoringRules,
        assessor: Arc<dyn QualitativeAssessor>,
        timeout: Duration,
    ) -> Self {
        Self {
            rules,
            assessor,
            timeout,
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn assessor(&self) -> &Arc<dyn QualitativeAssessor> {
        &self.assessor
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deterministic score, no collaborator involved
    pub fn score(&self, transcript: &str, attention: &AttentionSummary) -> ScoredAnswer {
        score(transcript, attention, &self.rules)
    }

    /// Deterministic score enriched by the assessor when it answers in time
    pub async fn score_enriched(
        &self,
        question: &str,
        transcript: &str,
        attention: &AttentionSummary,
    ) -> ScoredAnswer {
        let mut scored = self.score(transcript, attention);

        let prompt = AssessmentPrompt::Answer {
            question: question.to_string(),
            transcript: transcript.to_string(),
        };

        match assess_with_timeout(self.assessor.as_ref(), &prompt, self.timeout).await {
            Ok(reply) => self.apply_reply(&mut scored.scores, &reply),
            Err(e) => warn!("Assessor grading failed; keeping heuristic scores: {}", e),
        }

        scored
    }

    fn apply_reply(&self, card: &mut ScoreCard, reply: &str) {
        let parsed = extract_json(reply).and_then(|json| serde_json::from_str::<GradeReply>(json).ok());
        let Some(grade) = parsed else {
            warn!("Assessor returned non-JSON grading; keeping heuristic scores");
            return;
        };

        if self.rules.accept_assessor_scores {
            let current = card.clone();
            card.clarity = normalize_subscore(grade.clarity.as_ref()).unwrap_or(current.clarity);
            card.relevance =
                normalize_subscore(grade.relevance.as_ref()).unwrap_or(current.relevance);
            card.structure =
                normalize_subscore(grade.structure.as_ref()).unwrap_or(current.structure);
            card.conciseness =
                normalize_subscore(grade.conciseness.as_ref()).unwrap_or(current.conciseness);
            card.confidence =
                normalize_subscore(grade.confidence.as_ref()).unwrap_or(current.confidence);
            card.recompute_total();
            debug!(total = card.total, "Applied assessor sub-scores");
        }

        card.commentary = grade
            .commentary
            .or(grade.summary)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
    }
}
