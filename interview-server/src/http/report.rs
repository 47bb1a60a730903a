//! Report finalize and retrieval handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use interview_core::Report;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::BearerToken;

#[derive(Debug, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinalizeResponse {
    #[serde(flatten)]
    pub report: Report,
    /// True when the stored report was returned without recomputation
    pub replayed: bool,
}

/// POST /report/finalize
pub async fn finalize(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<FinalizeResponse>, ApiError> {
    token.authorize(&state.issuer, &request.session_id)?;
    let outcome = state.session_manager.finalize(&request.session_id).await?;

    Ok(Json(FinalizeResponse {
        report: (*outcome.report).clone(),
        replayed: outcome.replayed,
    }))
}

/// GET /report/:id
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    token: BearerToken,
) -> Result<Json<Report>, ApiError> {
    token.authorize(&state.issuer, &id)?;

    state
        .session_manager
        .report(&id)
        .await?
        .map(|report| Json((*report).clone()))
        .ok_or_else(|| ApiError::NotFound(format!("Report not finalized: {}", id)))
}
