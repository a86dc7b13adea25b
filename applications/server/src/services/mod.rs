/// Service layer: orchestrator, command dispatch, event pumps
pub mod commands;
pub mod events;
pub mod orchestrator;

pub use commands::CommandDispatcher;
pub use events::EventPumps;
pub use orchestrator::{Orchestrator, PlaybackStatus, ProviderSearchResult, SearchKind};
