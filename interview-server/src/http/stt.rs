//! Speech-to-text transcript ingestion

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use interview_core::{AppendOutcome, IngestAck, SessionError, TranscriptSegment};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::BearerToken;

fn default_is_final() -> bool {
    true
}

/// POST /stt/append body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendRequest {
    pub session_id: String,
    /// Defaults to the session's current question
    #[serde(default)]
    pub question_index: Option<usize>,
    pub text: String,
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default = "default_is_final")]
    pub is_final: bool,
}

impl AppendRequest {
    pub fn into_segment(self) -> TranscriptSegment {
        let mut segment = if self.is_final {
            TranscriptSegment::final_text(self.session_id, self.text)
        } else {
            TranscriptSegment::interim_text(self.session_id, self.text)
        };
        segment.question_index = self.question_index;
        segment.sequence = self.sequence;
        segment
    }
}

/// Acknowledgement for an appended segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendResponse {
    /// Always "ok" for a delivered segment, duplicates included
    pub status: String,
    pub question_index: usize,
    /// Whether the text was added to the stored transcript
    pub accepted: bool,
    /// Live preview for interim segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl AppendResponse {
    pub fn from_outcome(question_index: usize, outcome: AppendOutcome) -> Self {
        let (accepted, preview) = match outcome {
            AppendOutcome::Accepted => (true, None),
            AppendOutcome::Duplicate | AppendOutcome::Empty => (false, None),
            AppendOutcome::Preview(text) => (false, Some(text)),
        };
        Self {
            status: "ok".to_string(),
            question_index,
            accepted,
            preview,
        }
    }
}

/// POST /stt/append
pub async fn append(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Json(request): Json<AppendRequest>,
) -> Result<Json<AppendResponse>, ApiError> {
    token.authorize(&state.issuer, &request.session_id)?;

    match state
        .session_manager
        .ingest(request.into_segment().into())
        .await?
    {
        IngestAck::Transcript {
            question_index,
            outcome,
        } => Ok(Json(AppendResponse::from_outcome(question_index, outcome))),
        IngestAck::Attention { .. } => Err(ApiError::Session(SessionError::InvalidEvent(
            "transcript ingestion produced an attention ack".to_string(),
        ))),
    }
}
