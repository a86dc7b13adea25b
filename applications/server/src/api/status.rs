/// Playback status route
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Upcoming tracks shown by the status route
const UPCOMING_COUNT: usize = 5;

/// GET /api/status - Current track, upcoming tracks, mode, paused flag
pub async fn status(State(state): State<AppState>) -> Result<Json<Value>> {
    let status = state.orchestrator.playback_status(UPCOMING_COUNT).await;

    Ok(Json(json!({
        "success": true,
        "current": status.current,
        "upcoming": status.upcoming,
        "mode": {
            "name": status.mode.to_string(),
            "value": status.mode.index(),
        },
        "paused": status.paused,
        "queue_length": status.queue_length,
    })))
}
