//! interview-core: session aggregation and scoring for timed interviews
//!
//! Three independent signal streams feed one session: speech-recognition
//! transcript segments, webcam-derived attention events, and elapsed time.
//! This crate merges them per question and per session, scores each answer,
//! and finalizes the session into a single immutable report.
//!
//! - **Sessions** - [`SessionManager`] owns every [`InterviewSession`] and
//!   mediates all access through its operations
//! - **Aggregation** - [`TranscriptAccumulator`] per question,
//!   [`AttentionAggregator`] per session, [`QuestionTimer`] per question
//! - **Scoring** - [`ScoringRules`] is the deterministic rubric;
//!   [`ScoringEngine`] adds optional [`QualitativeAssessor`] enrichment
//! - **Reports** - [`ReportFinalizer`] builds the report once and persists it
//!   through a [`ReportStore`]
//! - **Credentials** - [`CredentialIssuer`] issues session-bound bearer tokens
//!
//! # Quick Start
//!
//! ```no_run
//! use interview_core::{SessionManager, TranscriptSegment};
//!
//! async fn example() -> Result<(), interview_core::InterviewError> {
//!     let manager = SessionManager::default();
//!     let started = manager.start_profile(Some("engineering")).await?;
//!
//!     let segment = TranscriptSegment::final_text(&started.session_id, "SOLID stands for...");
//!     manager.ingest(segment.into()).await?;
//!
//!     let outcome = manager.finalize(&started.session_id).await?;
//!     println!("{}", outcome.report.summary);
//!     Ok(())
//! }
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!   start ──► Active ──finalize──► Finalizing ──► Finalized
//!              ▲  │ advance / ingest     │
//!              │  └──────────────┘       │ store failure
//!              └─────────────────────────┘
//! ```

pub mod assessor;
pub mod attention;
pub mod auth;
pub mod error;
pub mod events;
pub mod profiles;
pub mod report;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod transcript;

// Re-export key types for convenience
pub use assessor::{
    AssessmentPrompt, AssessorConfig, AssessorProvider, MockAssessor, QualitativeAssessor,
    SlowMockAssessor,
};
pub use attention::{AttentionAggregator, AttentionSnapshot, AttentionSummary};
pub use auth::{AuthConfig, AuthError, Credential, CredentialIssuer};
pub use error::{AssessorError, InterviewError, SessionError, StoreError};
pub use events::{AttentionEvent, AttentionState, SegmentKind, SessionEvent, TranscriptSegment};
pub use profiles::QuestionBank;
pub use report::{
    FALLBACK_SUMMARY, JsonFileReportStore, MemoryReportStore, QuestionReport, Report,
    ReportFinalizer, ReportStore, StorageConfig,
};
pub use scoring::{ScoreCard, ScoredAnswer, ScoringEngine, ScoringRules};
pub use session::{
    FinalizeOutcome, IngestAck, InterviewSession, Question, SessionConfig, SessionManager,
    SessionStatus, SessionView, StartedSession,
};
pub use timer::{QuestionTimer, TimerState};
pub use transcript::{AppendOutcome, TranscriptAccumulator};
