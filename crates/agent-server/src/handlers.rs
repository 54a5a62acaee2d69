//! HTTP Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use agent_core::RunResult;

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub user_id: String,
    pub message: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Run one agent turn.
///
/// Fatal run errors map to 500 with no partial result; tool failures are
/// already contained in the returned log.
pub async fn run_handler(
    State(state): State<AppState>,
    Json(payload): Json<RunRequest>,
) -> Result<Json<RunResult>, (StatusCode, Json<ErrorResponse>)> {
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id, user_id = %payload.user_id);

    let result = state
        .agent
        .run(&payload.user_id, &payload.message, &payload.location)
        .instrument(span.clone())
        .await
        .map_err(|e| {
            span.in_scope(|| tracing::error!("Agent error: {}", e));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.user_message(),
                    code: "AGENT_ERROR".into(),
                }),
            )
        })?;

    span.in_scope(|| {
        tracing::info!(tool_calls = result.tool_calls().len(), "Run complete");
    });
    Ok(Json(result))
}
