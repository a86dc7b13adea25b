/// Provider status route
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// GET /api/system - Login/server state of every enabled provider
pub async fn system(State(state): State<AppState>) -> Result<Json<Value>> {
    let providers = state.orchestrator.provider_statuses().await;

    Ok(Json(json!({
        "success": true,
        "providers": providers,
    })))
}
