//! HTTP server module

mod api;
mod interview;
mod report;
mod stt;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::ws;

pub use api::HealthResponse;
pub use interview::{
    AdvanceResponse, AttentionEventRequest, StartRequest, StartResponse, TranscriptResponse,
};
pub use report::{FinalizeRequest, FinalizeResponse};
pub use stt::{AppendRequest, AppendResponse};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/interview/start", post(interview::start))
        .route("/interview/:id", get(interview::get_session))
        .route("/interview/:id/advance", post(interview::advance))
        .route(
            "/interview/:id/attention",
            get(interview::get_attention).post(interview::post_attention),
        )
        .route(
            "/interview/:id/transcript/:index",
            get(interview::get_transcript),
        )
        .route("/interview/:id/stream", get(ws::stream_handler))
        .route("/stt/append", post(stt::append))
        .route("/report/finalize", post(report::finalize))
        .route("/report/:id", get(report::get_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
