//! WebSocket protocol message types
//!
//! The stream carries both transcript and attention events for a single
//! session; the session id comes from the connection URL.

use chrono::{DateTime, Utc};
use interview_core::{AttentionSnapshot, SessionError, SessionEvent, TranscriptSegment};
use serde::{Deserialize, Serialize};

use crate::http::{AppendRequest, AppendResponse, AttentionEventRequest};

fn default_is_final() -> bool {
    true
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Speech-to-text fragment
    Transcript {
        #[serde(default)]
        question_index: Option<usize>,
        text: String,
        #[serde(default)]
        sequence: Option<u64>,
        #[serde(default = "default_is_final")]
        is_final: bool,
    },

    /// Attention classifier observation
    Attention {
        state: String,
        event: String,
        #[serde(default)]
        confidence: f32,
        #[serde(default)]
        timestamp: Option<DateTime<Utc>>,
    },
}

impl ClientMessage {
    /// Bind the message to the connection's session
    pub fn into_event(self, session_id: &str) -> Result<SessionEvent, SessionError> {
        match self {
            Self::Transcript {
                question_index,
                text,
                sequence,
                is_final,
            } => Ok(AppendRequest {
                session_id: session_id.to_string(),
                question_index,
                text,
                sequence,
                is_final,
            }
            .into_segment()
            .into()),
            Self::Attention {
                state,
                event,
                confidence,
                timestamp,
            } => AttentionEventRequest {
                state,
                event,
                confidence,
                timestamp,
            }
            .into_event(session_id)
            .map(SessionEvent::from),
        }
    }
}

/// Parse a text frame. JSON objects must be valid protocol messages; any
/// other frame is taken as final transcript text for the current question
pub fn parse_frame(text: &str, session_id: &str) -> Result<SessionEvent, SessionError> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) if value.is_object() => serde_json::from_value::<ClientMessage>(value)
            .map_err(|e| SessionError::InvalidEvent(format!("malformed stream message: {}", e)))?
            .into_event(session_id),
        _ => Ok(TranscriptSegment::final_text(session_id, text).into()),
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once after the upgrade completes
    Connected { session_id: String },

    /// Transcript fragment processed
    TranscriptAck {
        question_index: usize,
        accepted: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview: Option<String>,
    },

    /// Attention event recorded
    AttentionAck { snapshot: AttentionSnapshot },

    /// Event rejected; the connection stays open
    Error { code: String, message: String },
}

impl From<AppendResponse> for ServerMessage {
    fn from(response: AppendResponse) -> Self {
        Self::TranscriptAck {
            question_index: response.question_index,
            accepted: response.accepted,
            preview: response.preview,
        }
    }
}
