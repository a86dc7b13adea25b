/// Capability traits implemented by external collaborators
use crate::error::Result;
use crate::types::{
    CatalogEntry, ChannelId, ContentReference, MemberId, ProviderTag, ProviderUser, Track,
    TrackList,
};
use async_trait::async_trait;

/// External music catalog service
///
/// A provider is tagged with a stable identity; its configured aliases and
/// enabled flag live in the provider registry, not here. `limit` follows
/// the shared convention: 0 means unlimited.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Stable provider identity
    fn tag(&self) -> &ProviderTag;

    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Description of the backing server (URL or path)
    fn server_descriptor(&self) -> String;

    /// URL substrings that identify this provider in free text
    fn url_fragments(&self) -> Vec<String>;

    /// Classify raw input text into a content reference
    async fn classify_input(&self, text: &str) -> Result<ContentReference>;

    /// Search tracks by free text
    async fn search_track(&self, text: &str, limit: usize) -> Result<Vec<Track>>;

    /// Search playlists by free text
    async fn search_playlist(&self, text: &str, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// Search albums by free text
    async fn search_album(&self, text: &str, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// Fetch track details by id
    async fn get_track(&self, id: &str) -> Result<Track>;

    /// Fetch a playlist's member tracks, bounded by `limit`
    async fn get_playlist(&self, id: &str, limit: usize) -> Result<TrackList>;

    /// Fetch an album's member tracks, bounded by `limit`
    async fn get_album(&self, id: &str, limit: usize) -> Result<TrackList>;

    /// Log in with provider-specific arguments; returns a reply message
    async fn login(&self, args: &[String]) -> Result<String>;

    /// Currently logged-in user, if any
    async fn current_user(&self) -> Result<Option<ProviderUser>>;
}

/// Audio playback pipeline control
#[async_trait]
pub trait PlaybackControl: Send + Sync {
    /// Start playing a track, replacing whatever was playing
    async fn start(&self, track: &Track) -> Result<()>;

    /// Stop playback entirely
    async fn stop(&self) -> Result<()>;

    /// Pause or resume without losing position
    async fn set_paused(&self, paused: bool) -> Result<()>;

    /// Whether a track is currently loaded and playing
    async fn is_playing(&self) -> bool;

    /// Whether playback is paused
    async fn is_paused(&self) -> bool;
}

/// Voice channel membership queries
///
/// Membership *events* are delivered separately through a channel the
/// orchestrator subscribes to at startup.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// The bot's own member id (excluded from presence counting)
    fn self_id(&self) -> MemberId;

    /// Full membership of a channel
    async fn list_members(&self, channel: ChannelId) -> Result<Vec<MemberId>>;
}

/// Sink for user-visible status text (channel description, idle notice)
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn set_status(&self, text: &str) -> Result<()>;
}
