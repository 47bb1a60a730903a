//! WebSocket connection handling

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use interview_core::IngestAck;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::error::ApiError;
use crate::http::AppendResponse;
use crate::middleware::BearerToken;

use super::protocol::{ServerMessage, parse_frame};

/// Query parameters of the stream endpoint
///
/// Browsers cannot set headers on a WebSocket handshake, so the credential
/// travels as `?token=`.
#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// WebSocket upgrade handler for GET /interview/:id/stream
///
/// The credential and session are checked before the upgrade, so a rejected
/// client sees an ordinary HTTP error.
pub async fn stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Query(query): Query<StreamQuery>,
) -> Response {
    if let Err(e) = BearerToken(query.token).authorize(&state.issuer, &session_id) {
        return ApiError::from(e).into_response();
    }
    if let Err(e) = state.session_manager.view(&session_id).await {
        return ApiError::from(e).into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

/// Handle a WebSocket connection bound to one session
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: String) {
    let (mut sender, mut receiver) = socket.split();

    info!(session_id = %session_id, "Stream client connected");

    let connected = ServerMessage::Connected {
        session_id: session_id.clone(),
    };
    if send(&mut sender, &connected).await.is_err() {
        return;
    }

    // Process incoming messages
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let reply = handle_text_message(&text, &state, &session_id).await;
                if send(&mut sender, &reply).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!("Stream client sent close frame");
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(_) => {
                // Ignore binary and pong messages
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
        }
    }

    info!(session_id = %session_id, "Stream client disconnected");
}

/// Ingest one text frame and build the reply
async fn handle_text_message(text: &str, state: &Arc<AppState>, session_id: &str) -> ServerMessage {
    let result = match parse_frame(text, session_id) {
        Ok(event) => state.session_manager.ingest(event).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(IngestAck::Transcript {
            question_index,
            outcome,
        }) => AppendResponse::from_outcome(question_index, outcome).into(),
        Ok(IngestAck::Attention { snapshot }) => ServerMessage::AttentionAck { snapshot },
        Err(e) => {
            warn!(session_id = %session_id, "Rejected stream event: {}", e);
            let error = ApiError::from(e);
            ServerMessage::Error {
                code: error.code().to_string(),
                message: error.to_string(),
            }
        }
    }
}

async fn send(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            error!("Failed to serialize server message: {}", e);
            Ok(())
        }
    }
}
