//! Interview lifecycle and attention handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use interview_core::{
    AttentionEvent, AttentionSnapshot, AttentionState, Credential, IngestAck, Question,
    SessionError, SessionView,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::BearerToken;

/// POST /interview/start body
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StartRequest {
    /// Question profile; unknown roles fall back to the default profile
    #[serde(default)]
    pub role: Option<String>,
    /// Explicit prompts, taking precedence over `role`
    #[serde(default)]
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub session_id: String,
    pub questions: Vec<Question>,
    pub credential: Credential,
}

/// POST /interview/start
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartResponse>, ApiError> {
    let started = match request.questions {
        Some(prompts) => state.session_manager.start(prompts).await?,
        None => {
            state
                .session_manager
                .start_profile(request.role.as_deref())
                .await?
        }
    };

    let credential = match state.issuer.issue(&started.session_id) {
        Ok(credential) => credential,
        Err(e) => {
            state.session_manager.remove(&started.session_id).await;
            return Err(e.into());
        }
    };
    info!(
        session_id = %started.session_id,
        role = request.role.as_deref().unwrap_or("general"),
        "Interview started"
    );

    Ok(Json(StartResponse {
        session_id: started.session_id,
        questions: started.questions,
        credential,
    }))
}

/// GET /interview/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.session_manager.view(&id).await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceResponse {
    pub session_id: String,
    pub cursor: usize,
    pub question: Question,
}

/// POST /interview/:id/advance
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<AdvanceResponse>, ApiError> {
    token.authorize(&state.issuer, &id)?;
    let question = state.session_manager.advance(&id).await?;

    Ok(Json(AdvanceResponse {
        session_id: id,
        cursor: question.index,
        question,
    }))
}

/// Attention event as posted by the monitoring client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionEventRequest {
    /// "focused", "distracted" or "unknown"
    pub state: String,
    /// Classifier label, e.g. "cell_phone_detected"
    pub event: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AttentionEventRequest {
    pub fn into_event(self, session_id: &str) -> Result<AttentionEvent, SessionError> {
        let state = AttentionState::parse(&self.state.to_lowercase()).ok_or_else(|| {
            SessionError::InvalidEvent(format!("unknown attention state: {}", self.state))
        })?;

        let mut event = AttentionEvent::new(session_id, state, self.event, self.confidence);
        if let Some(timestamp) = self.timestamp {
            event.timestamp = timestamp;
        }
        Ok(event)
    }
}

/// POST /interview/:id/attention
pub async fn post_attention(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AttentionEventRequest>,
) -> Result<Json<AttentionSnapshot>, ApiError> {
    let event = request.into_event(&id)?;
    match state.session_manager.ingest(event.into()).await? {
        IngestAck::Attention { snapshot } => Ok(Json(snapshot)),
        IngestAck::Transcript { .. } => Err(SessionError::InvalidEvent(
            "attention event produced a transcript ack".to_string(),
        )
        .into()),
    }
}

/// GET /interview/:id/attention
pub async fn get_attention(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AttentionSnapshot>, ApiError> {
    state
        .session_manager
        .attention_snapshot(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Attention data not found".to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub question_index: usize,
    pub transcript: String,
}

/// GET /interview/:id/transcript/:index
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let transcript = state.session_manager.transcript(&id, index).await?;
    Ok(Json(TranscriptResponse {
        session_id: id,
        question_index: index,
        transcript,
    }))
}
