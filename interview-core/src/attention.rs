//! Session-wide attention aggregation
//!
//! The snapshot is last-write-wins by arrival, like a live monitor rather
//! than an audit log. Counters only ever grow.

use serde::{Deserialize, Serialize};

use crate::events::{AttentionEvent, AttentionState};

/// Point read of the most recently received event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionSnapshot {
    pub state: AttentionState,
    /// Confidence of the last event
    pub score: Option<f32>,
    /// Label of the last event
    pub last_event: Option<String>,
}

impl Default for AttentionSnapshot {
    fn default() -> Self {
        Self {
            state: AttentionState::Unknown,
            score: None,
            last_event: None,
        }
    }
}

/// Focus ratios over classified (non-unknown) events
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttentionSummary {
    pub focused_ratio: f64,
    pub distracted_ratio: f64,
    pub focused_count: u64,
    pub distracted_count: u64,
    pub unknown_count: u64,
}

impl AttentionSummary {
    /// Events that counted toward the ratios
    pub fn classified_count(&self) -> u64 {
        self.focused_count + self.distracted_count
    }
}

/// Folds attention events into a snapshot and running ratios
#[derive(Debug, Clone, Default)]
pub struct AttentionAggregator {
    last: Option<AttentionEvent>,
    focused: u64,
    distracted: u64,
    unknown: u64,
}

impl AttentionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: AttentionEvent) {
        match event.state {
            AttentionState::Focused => self.focused += 1,
            AttentionState::Distracted => self.distracted += 1,
            AttentionState::Unknown => self.unknown += 1,
        }
        self.last = Some(event);
    }

    /// Whether any event has been recorded
    pub fn has_events(&self) -> bool {
        self.last.is_some()
    }

    pub fn total_events(&self) -> u64 {
        self.focused + self.distracted + self.unknown
    }

    pub fn snapshot(&self) -> AttentionSnapshot {
        match &self.last {
            Some(event) => AttentionSnapshot {
                state: event.state,
                score: Some(event.confidence),
                last_event: Some(event.label.clone()),
            },
            None => AttentionSnapshot::default(),
        }
    }

    /// Ratios over focused + distracted; both zero before any classified event
    pub fn summary(&self) -> AttentionSummary {
        let classified = self.focused + self.distracted;
        let (focused_ratio, distracted_ratio) = if classified == 0 {
            (0.0, 0.0)
        } else {
            let focused_ratio = self.focused as f64 / classified as f64;
            (focused_ratio, 1.0 - focused_ratio)
        };

        AttentionSummary {
            focused_ratio,
            distracted_ratio,
            focused_count: self.focused,
            distracted_count: self.distracted,
            unknown_count: self.unknown,
        }
    }
}
