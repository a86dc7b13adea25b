//! Chorus - Core vocabulary
//!
//! Shared types and capability traits for the Chorus playback bot.
//!
//! This crate defines:
//! - The track/reference data model shared by every component
//! - Play modes and their numeric command mapping
//! - Channel/member identifiers and membership events
//! - The capability traits implemented by external collaborators
//!   (catalog providers, the playback pipeline, the voice backend)
//! - The core error type
//!
//! `chorus-core` is completely platform-agnostic: no runtime, no HTTP,
//! no concrete provider client. Everything with I/O behind it is a trait.

pub mod error;
pub mod traits;
pub mod types;

// Public exports
pub use error::{Error, Result};
pub use traits::{CatalogProvider, ChannelDirectory, PlaybackControl, StatusSink};
pub use types::{
    CatalogEntry, ChannelEvent, ChannelId, ContentReference, MemberId, PlayMode, PlaybackEvent,
    ProviderStatus, ProviderTag, ProviderUser, Track, TrackList,
};
