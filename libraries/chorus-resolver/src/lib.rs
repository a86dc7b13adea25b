//! Chorus - Request resolution
//!
//! Turns ambiguous free-text commands into a concrete
//! (provider, content reference, result limit) triple.
//!
//! The registry holds every configured provider in a fixed registration
//! order, so resolution heuristics (URL-fragment scan, classifier probe)
//! are reproducible given the same provider set and configuration.

mod registry;
mod request;
mod resolve;

// Public exports
pub use registry::ProviderRegistry;
pub use request::{PlaybackRequest, DEFAULT_RESULT_LIMIT};
pub use resolve::{Resolver, DEFAULT_MAX_TOKENS};
