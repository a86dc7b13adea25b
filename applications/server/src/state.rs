/// Shared application state
use crate::services::Orchestrator;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Shared secret for the API routes; `None` disables the check
    pub secret: Option<String>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, secret: Option<String>) -> Self {
        Self {
            orchestrator,
            secret,
        }
    }
}
