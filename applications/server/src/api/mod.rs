/// API route modules and router assembly
use crate::{middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub mod command;
pub mod control;
pub mod health;
pub mod login;
pub mod search;
pub mod status;
pub mod system;

/// Build the full application router
///
/// Everything under `/api` passes the shared-secret check; the root
/// document does not.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/status", get(status::status))
        .route("/system", get(system::system))
        .route("/control", post(control::control))
        .route("/setmode", post(control::set_mode))
        .route("/cmd", post(command::command))
        .route("/login", post(login::login))
        .route("/search", get(search::search))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_secret,
        ));

    Router::new()
        .route("/", get(health::index))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
