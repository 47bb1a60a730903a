//! InterviewSession struct and lifecycle state machine
//!
//! The session owns the question cursor, the lifecycle status, one
//! transcript accumulator per question and the session-wide attention
//! aggregator. Every mutation goes through a method here; failed calls are
//! rejected before anything is touched.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use crate::attention::{AttentionAggregator, AttentionSnapshot, AttentionSummary};
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::report::{FinalizeInput, Report};
use crate::timer::{QuestionTimer, TimerState};
use crate::transcript::{AppendOutcome, TranscriptAccumulator};

/// A prompt and its position in the interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub index: usize,
    pub prompt: String,
}

impl Question {
    pub fn new(index: usize, prompt: impl Into<String>) -> Self {
        Self {
            index,
            prompt: prompt.into(),
        }
    }
}

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Accepting events; the cursor may advance
    Active,
    /// Finalize in progress; mutating events are rejected
    Finalizing,
    /// Terminal; the report is stored
    Finalized,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finalizing => "finalizing",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `ingest` did with an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IngestAck {
    Transcript {
        question_index: usize,
        outcome: AppendOutcome,
    },
    Attention {
        snapshot: AttentionSnapshot,
    },
}

/// Result of entering finalize
#[derive(Debug)]
pub enum FinalizeStep {
    /// The session moved to `Finalizing`; run the finalizer on this input
    Run(FinalizeInput),
    /// Already finalized; the stored report
    Done(Arc<Report>),
}

/// Read-only view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub status: SessionStatus,
    pub cursor: usize,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub timer: TimerState,
    pub attention: AttentionSnapshot,
}

/// One interview
pub struct InterviewSession {
    id: String,
    questions: Vec<Question>,
    cursor: usize,
    status: SessionStatus,
    created_at: DateTime<Utc>,
    answer_time_limit: std::time::Duration,
    timer: QuestionTimer,
    transcripts: Vec<TranscriptAccumulator>,
    attention: AttentionAggregator,
    report: Option<Arc<Report>>,
}

impl InterviewSession {
    /// Create an `Active` session at question 0
    ///
    /// Blank prompts are dropped; fails with `Config` when none remain.
    pub fn new(
        id: impl Into<String>,
        prompts: Vec<String>,
        config: &SessionConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let questions: Vec<Question> = prompts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .enumerate()
            .map(|(index, prompt)| Question::new(index, prompt))
            .collect();

        if questions.is_empty() {
            return Err(SessionError::Config(
                "no questions resolved for this session".to_string(),
            ));
        }

        let transcripts = vec![TranscriptAccumulator::new(); questions.len()];
        let answer_time_limit = config.answer_time_limit();

        Ok(Self {
            id: id.into(),
            questions,
            cursor: 0,
            status: SessionStatus::Active,
            created_at: now,
            answer_time_limit,
            timer: QuestionTimer::start(answer_time_limit, now),
            transcripts,
            attention: AttentionAggregator::new(),
            report: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn timer(&self) -> &QuestionTimer {
        &self.timer
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn report(&self) -> Option<&Arc<Report>> {
        self.report.as_ref()
    }

    /// Move to the next question and restart the countdown
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<&Question, SessionError> {
        if self.status != SessionStatus::Active {
            return Err(SessionError::InvalidTransition {
                action: "advance".to_string(),
                reason: format!("session is {}", self.status),
            });
        }
        if self.cursor + 1 >= self.questions.len() {
            return Err(SessionError::InvalidTransition {
                action: "advance".to_string(),
                reason: "already on the last question; finalize instead".to_string(),
            });
        }

        self.cursor += 1;
        self.timer = QuestionTimer::start(self.answer_time_limit, now);
        Ok(&self.questions[self.cursor])
    }

    /// Route an event to its aggregator
    ///
    /// Transcript segments without a question index go to the current
    /// question. An explicit index may point at any issued question, so late
    /// segments for a question already advanced past are still accepted.
    pub fn ingest(&mut self, event: SessionEvent) -> Result<IngestAck, SessionError> {
        if self.status != SessionStatus::Active {
            return Err(SessionError::SessionClosed {
                status: self.status.to_string(),
            });
        }
        if event.session_id() != self.id {
            return Err(SessionError::InvalidEvent(format!(
                "event for session {} sent to session {}",
                event.session_id(),
                self.id
            )));
        }

        match event {
            SessionEvent::Transcript(segment) => {
                let index = segment.question_index.unwrap_or(self.cursor);
                let count = self.questions.len();
                let accumulator = self
                    .transcripts
                    .get_mut(index)
                    .ok_or(SessionError::InvalidQuestion { index, count })?;
                let outcome = accumulator.append(&segment);
                Ok(IngestAck::Transcript {
                    question_index: index,
                    outcome,
                })
            }
            SessionEvent::Attention(event) => {
                event.validate()?;
                self.attention.record(event);
                Ok(IngestAck::Attention {
                    snapshot: self.attention.snapshot(),
                })
            }
        }
    }

    /// Accepted transcript for a question
    pub fn transcript(&self, index: usize) -> Result<&str, SessionError> {
        self.transcripts
            .get(index)
            .map(TranscriptAccumulator::transcript)
            .ok_or(SessionError::InvalidQuestion {
                index,
                count: self.questions.len(),
            })
    }

    /// Latest attention reading, `None` before any event
    pub fn attention_snapshot(&self) -> Option<AttentionSnapshot> {
        self.attention
            .has_events()
            .then(|| self.attention.snapshot())
    }

    pub fn attention_summary(&self) -> AttentionSummary {
        self.attention.summary()
    }

    /// Enter `Finalizing`, or hand back the stored report if finalized
    pub fn begin_finalize(&mut self) -> Result<FinalizeStep, SessionError> {
        match self.status {
            SessionStatus::Active => {
                self.status = SessionStatus::Finalizing;
                Ok(FinalizeStep::Run(self.finalize_input()))
            }
            SessionStatus::Finalizing => Err(SessionError::InvalidTransition {
                action: "finalize".to_string(),
                reason: "finalize already in progress".to_string(),
            }),
            SessionStatus::Finalized => match &self.report {
                Some(report) => Ok(FinalizeStep::Done(report.clone())),
                None => Err(SessionError::InvalidTransition {
                    action: "finalize".to_string(),
                    reason: "finalized session has no report".to_string(),
                }),
            },
        }
    }

    /// Store the report and enter `Finalized`
    pub fn complete_finalize(&mut self, report: Arc<Report>) {
        self.report = Some(report);
        self.status = SessionStatus::Finalized;
    }

    /// Return to `Active` after a failed finalize
    pub fn abort_finalize(&mut self) {
        if self.status == SessionStatus::Finalizing {
            self.status = SessionStatus::Active;
        }
    }

    pub fn view(&self, now: DateTime<Utc>) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            status: self.status,
            cursor: self.cursor,
            questions: self.questions.clone(),
            created_at: self.created_at,
            timer: self.timer.state(now),
            attention: self.attention.snapshot(),
        }
    }

    fn finalize_input(&self) -> FinalizeInput {
        FinalizeInput {
            session_id: self.id.clone(),
            answers: self
                .questions
                .iter()
                .zip(&self.transcripts)
                .map(|(question, acc)| (question.clone(), acc.transcript().to_string()))
                .collect(),
            attention: self.attention.summary(),
        }
    }
}
