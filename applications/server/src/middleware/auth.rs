/// Shared-secret middleware
///
/// When a secret is configured, every API route requires it via the
/// `x-chorus-token` header or a `token` query parameter. The root
/// document stays reachable without it.
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub const TOKEN_HEADER: &str = "x-chorus-token";

pub async fn require_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(secret) = &state.secret else {
        return Ok(next.run(request).await);
    };

    let header_token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());
    let query_token = request.uri().query().and_then(extract_token);

    let authorized = header_token == Some(secret.as_str())
        || query_token.as_deref() == Some(secret.as_str());
    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(ServerError::Unauthorized(
            "missing or invalid token".to_string(),
        ))
    }
}

fn extract_token(query: &str) -> Option<String> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .map(str::to_string)
}
