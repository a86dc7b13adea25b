/// Transport control and mode routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ControlParams {
    pub action: String,
}

/// POST /api/control?action=next|stop|pause|resume|clear
pub async fn control(
    State(state): State<AppState>,
    Query(params): Query<ControlParams>,
) -> Result<Json<Value>> {
    let orchestrator = &state.orchestrator;
    let message = match params.action.as_str() {
        "next" => orchestrator.play_next().await?,
        "stop" => orchestrator.stop().await?,
        "pause" => orchestrator.pause().await?,
        "resume" => orchestrator.resume().await?,
        "clear" => {
            // The stop runs as its own task; the response does not wait.
            let _handle = orchestrator.clear().await;
            "Queue cleared".to_string()
        }
        other => {
            return Err(ServerError::BadRequest(format!(
                "unknown action: {other}"
            )))
        }
    };

    Ok(Json(json!({
        "success": true,
        "message": message,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SetModeParams {
    pub mode: u8,
}

/// POST /api/setmode?mode=N - Change the play mode (0..=3)
pub async fn set_mode(
    State(state): State<AppState>,
    Query(params): Query<SetModeParams>,
) -> Result<Json<Value>> {
    let message = state.orchestrator.set_mode(params.mode).await?;

    Ok(Json(json!({
        "success": true,
        "message": message,
    })))
}
