//! Event type definitions
//!
//! Delivery is at-least-once with no ordering guarantee: producers post
//! fire-and-forget, so the same segment may arrive twice and segments may
//! arrive with lower sequence numbers after higher ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Whether a speech-recognition fragment is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Transient display hint, never persisted
    Interim,
    /// Settled text, appended permanently
    #[default]
    Final,
}

/// A fragment of the candidate's spoken answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub session_id: String,
    /// Question the fragment belongs to; `None` routes to the current question
    #[serde(default)]
    pub question_index: Option<usize>,
    pub text: String,
    /// Producer-supplied sequence number, used only for duplicate suppression
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub kind: SegmentKind,
}

impl TranscriptSegment {
    /// Create a final segment for the current question
    pub fn final_text(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            question_index: None,
            text: text.into(),
            sequence: None,
            kind: SegmentKind::Final,
        }
    }

    /// Create an interim segment for the current question
    pub fn interim_text(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Interim,
            ..Self::final_text(session_id, text)
        }
    }

    /// Target a specific question
    pub fn for_question(mut self, index: usize) -> Self {
        self.question_index = Some(index);
        self
    }

    /// Attach a producer sequence number
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn is_final(&self) -> bool {
        self.kind == SegmentKind::Final
    }
}

/// Attention classification of a webcam frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttentionState {
    Focused,
    Distracted,
    #[default]
    Unknown,
}

impl AttentionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Focused => "focused",
            Self::Distracted => "distracted",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "focused" => Some(Self::Focused),
            "distracted" => Some(Self::Distracted),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// A classifier observation from the attention monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionEvent {
    pub session_id: String,
    pub state: AttentionState,
    /// Free-form classifier output, e.g. "looking_forward"
    pub label: String,
    /// Classifier confidence in [0, 1]
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl AttentionEvent {
    /// Create an event stamped with the current time
    pub fn new(
        session_id: impl Into<String>,
        state: AttentionState,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            state,
            label: label.into(),
            confidence,
            timestamp: Utc::now(),
        }
    }

    /// Reject events whose confidence lies outside [0, 1]
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SessionError::InvalidEvent(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Anything that can be ingested into a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Transcript(TranscriptSegment),
    Attention(AttentionEvent),
}

impl SessionEvent {
    /// Session the event is addressed to
    pub fn session_id(&self) -> &str {
        match self {
            Self::Transcript(segment) => &segment.session_id,
            Self::Attention(event) => &event.session_id,
        }
    }
}

impl From<TranscriptSegment> for SessionEvent {
    fn from(segment: TranscriptSegment) -> Self {
        Self::Transcript(segment)
    }
}

impl From<AttentionEvent> for SessionEvent {
    fn from(event: AttentionEvent) -> Self {
        Self::Attention(event)
    }
}
