/// Health check and root document
use axum::{response::Html, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub version: String,
}

/// GET /api/health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET / - Minimal status page, reachable without the shared secret
pub async fn index() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Chorus</title></head>\
         <body><h1>Chorus</h1><p>The control API lives under <code>/api</code>.</p>\
         </body></html>",
    )
}
