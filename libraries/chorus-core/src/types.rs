//! Core types for the Chorus data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a catalog provider
///
/// Tags come from configuration and never change at runtime; every track
/// carries the tag of the provider it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderTag(String);

impl ProviderTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

/// Voice channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Voice channel member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single playable track
///
/// Immutable once constructed; identity is (provider tag, id). The id is
/// opaque and only meaningful to the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Provider-scoped opaque identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Author/artist string as reported by the provider
    pub artist: String,

    /// Tag of the provider this track belongs to
    pub provider: ProviderTag,
}

impl Track {
    /// Identity key: (provider tag, id)
    pub fn identity(&self) -> (&str, &str) {
        (self.provider.as_str(), &self.id)
    }
}

/// Classification of a raw input string
///
/// Produced by a provider's classifier, or `None` for plain search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ContentReference {
    /// Plain search text, no recognized reference
    None,

    /// A single track reference
    Track(String),

    /// A playlist reference
    PlayList(String),

    /// An album reference
    Album(String),

    /// A podcast reference
    Podcast(String),
}

impl ContentReference {
    /// The referenced id, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            ContentReference::None => None,
            ContentReference::Track(id)
            | ContentReference::PlayList(id)
            | ContentReference::Album(id)
            | ContentReference::Podcast(id) => Some(id),
        }
    }

    /// True for plain search text
    pub fn is_none(&self) -> bool {
        matches!(self, ContentReference::None)
    }
}

/// Next-track selection policy
///
/// Affects only what the next track is, never queue contents. The numeric
/// mapping (0..=3) is the one the command and HTTP surfaces use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Advance forward; stop at end of queue
    Sequential,

    /// Advance forward; wrap to the start after the last track
    SequentialLoop,

    /// Uniform draw without repetition within a pass; stop when exhausted
    Random,

    /// Uniform draw, reshuffling the exhausted pool; never stops
    RandomLoop,
}

impl PlayMode {
    /// Parse the numeric command value
    pub fn from_index(value: u8) -> Option<Self> {
        match value {
            0 => Some(PlayMode::Sequential),
            1 => Some(PlayMode::SequentialLoop),
            2 => Some(PlayMode::Random),
            3 => Some(PlayMode::RandomLoop),
            _ => None,
        }
    }

    /// Numeric command value
    pub fn index(self) -> u8 {
        match self {
            PlayMode::Sequential => 0,
            PlayMode::SequentialLoop => 1,
            PlayMode::Random => 2,
            PlayMode::RandomLoop => 3,
        }
    }

    /// True for the looping modes
    pub fn is_loop(self) -> bool {
        matches!(self, PlayMode::SequentialLoop | PlayMode::RandomLoop)
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayMode::Sequential => "sequential",
            PlayMode::SequentialLoop => "sequential-loop",
            PlayMode::Random => "random",
            PlayMode::RandomLoop => "random-loop",
        };
        f.write_str(name)
    }
}

/// Result of a playlist/album fetch: a labeled, ordered list of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackList {
    /// Display name of the playlist or album
    pub label: String,

    /// Tracks in provider-supplied order
    pub tracks: Vec<Track>,
}

impl TrackList {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A playlist/album search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// Logged-in user of a provider, for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    /// Display name
    pub name: String,

    /// Profile URL
    pub url: String,

    /// Provider-specific extra info (subscription level, region, ...)
    pub extra: Option<String>,
}

/// Snapshot of a provider's login/server state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub tag: ProviderTag,
    pub name: String,
    pub server: String,
    pub user: Option<ProviderUser>,
}

/// Channel membership event delivered by the voice backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A member entered a channel
    Entered { member: MemberId, channel: ChannelId },

    /// A member left a channel
    Left { member: MemberId, channel: ChannelId },

    /// A member moved between channels
    Moved {
        member: MemberId,
        from: ChannelId,
        to: ChannelId,
    },
}

/// Event delivered by the playback pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The current track finished playing
    TrackFinished,
}
