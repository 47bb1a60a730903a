//! Append-only transcript accumulation for one question
//!
//! Final segments are concatenated in arrival order, not sequence order.
//! Interim segments only produce a preview and never touch stored state.

use serde::{Deserialize, Serialize};

use crate::events::TranscriptSegment;

/// Result of appending a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "preview", rename_all = "snake_case")]
pub enum AppendOutcome {
    /// Final text was appended
    Accepted,
    /// Same sequence number and text as the last accepted segment
    Duplicate,
    /// Blank text, nothing to do
    Empty,
    /// Interim text: accepted transcript so far plus the interim fragment
    Preview(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LastAccepted {
    sequence: u64,
    text: String,
}

/// Canonical transcript of one (session, question) pair
#[derive(Debug, Clone, Default)]
pub struct TranscriptAccumulator {
    text: String,
    segments: usize,
    last: Option<LastAccepted>,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a segment into the transcript
    pub fn append(&mut self, segment: &TranscriptSegment) -> AppendOutcome {
        let text = segment.text.trim();

        if !segment.is_final() {
            return AppendOutcome::Preview(self.preview(text));
        }

        if text.is_empty() {
            return AppendOutcome::Empty;
        }

        if let (Some(sequence), Some(last)) = (segment.sequence, &self.last)
            && last.sequence == sequence
            && last.text == text
        {
            return AppendOutcome::Duplicate;
        }

        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
        self.segments += 1;
        self.last = segment.sequence.map(|sequence| LastAccepted {
            sequence,
            text: text.to_string(),
        });

        AppendOutcome::Accepted
    }

    /// Accepted text with an interim fragment appended, without storing it
    pub fn preview(&self, interim: &str) -> String {
        let interim = interim.trim();
        match (self.text.is_empty(), interim.is_empty()) {
            (true, _) => interim.to_string(),
            (false, true) => self.text.clone(),
            (false, false) => format!("{} {}", self.text, interim),
        }
    }

    /// The canonical accepted transcript
    pub fn transcript(&self) -> &str {
        &self.text
    }

    /// Number of final segments accepted so far
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
