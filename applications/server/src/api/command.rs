/// Unified play/add command route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// "play" replaces/starts, "add" appends
    pub action: String,

    /// Optional explicit type: "song", "list" or "album";
    /// omitted means classify the text
    #[serde(default)]
    pub kind: Option<String>,

    /// Free text, URL or provider-tagged reference
    pub data: String,
}

/// POST /api/cmd - Play or add by free text or explicit type
pub async fn command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<Value>> {
    let append = match request.action.as_str() {
        "play" => false,
        "add" => true,
        other => {
            return Err(ServerError::BadRequest(format!(
                "action must be play or add, got {other}"
            )))
        }
    };

    let orchestrator = &state.orchestrator;
    let data = request.data.as_str();
    let message = match request.kind.as_deref() {
        None | Some("song") if append => orchestrator.add(data).await?,
        None | Some("song") => orchestrator.play(data).await?,
        Some("list") => orchestrator.play_playlist(data, append).await?,
        Some("album") => orchestrator.play_album(data, append).await?,
        Some(other) => {
            return Err(ServerError::BadRequest(format!(
                "kind must be song, list or album, got {other}"
            )))
        }
    };

    Ok(Json(json!({
        "success": true,
        "message": message,
    })))
}
