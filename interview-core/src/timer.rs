//! Per-question answer countdown
//!
//! The timer never reads the clock itself; every query takes the current
//! instant from the caller so behavior is reproducible in tests.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown for the question currently being answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    limit: Duration,
    started_at: DateTime<Utc>,
}

impl QuestionTimer {
    /// Start a countdown of `limit` at `started_at`
    pub fn start(limit: Duration, started_at: DateTime<Utc>) -> Self {
        Self { limit, started_at }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time spent on the question; zero if `now` precedes the start
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// Time left before the limit, saturating at zero
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.limit.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now) >= self.limit
    }

    /// Serializable view of the countdown at `now`
    pub fn state(&self, now: DateTime<Utc>) -> TimerState {
        TimerState {
            limit_secs: self.limit.as_secs(),
            elapsed_secs: self.elapsed(now).as_secs(),
            remaining_secs: self.remaining(now).as_secs(),
            expired: self.is_expired(now),
        }
    }
}

/// Snapshot of a [`QuestionTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub limit_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub expired: bool,
}
