/// Provider login route
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub provider: String,

    #[serde(default)]
    pub args: Vec<String>,
}

/// POST /api/login - Forward login arguments to a provider
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let message = state
        .orchestrator
        .login(&request.provider, &request.args)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": message,
    })))
}
