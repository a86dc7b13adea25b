//! Chorus Server Library
//!
//! Shared voice-channel playback bot: free-text request resolution, a
//! queue/mode engine, presence-driven auto-pause, and an HTTP control API.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod providers;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{PlaybackSettings, ProviderSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use services::{commands::CommandDispatcher, orchestrator::Orchestrator};
pub use state::AppState;
