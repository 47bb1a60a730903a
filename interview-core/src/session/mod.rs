//! Session management

pub mod config;
pub mod manager;
pub mod state;

// Re-export key types for convenience
pub use config::SessionConfig;
pub use manager::{FinalizeOutcome, SessionManager, StartedSession};
pub use state::{
    FinalizeStep, IngestAck, InterviewSession, Question, SessionStatus, SessionView,
};
