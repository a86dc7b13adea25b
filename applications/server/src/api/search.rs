/// Catalog search route
use crate::{error::Result, services::SearchKind, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,

    /// "song" (default), "list" or "album"
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,

    /// Restrict to one provider alias; omitted searches all enabled
    #[serde(default)]
    pub provider: Option<String>,

    /// Clamped to 1..=50, default 10
    #[serde(default)]
    pub limit: Option<usize>,
}

/// GET /api/search - Bounded multi-provider catalog search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let kind: SearchKind = params.kind.as_deref().unwrap_or("song").parse()?;
    let results = state
        .orchestrator
        .search(params.provider.as_deref(), kind, &params.q, params.limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "results": results,
    })))
}
