//! Chorus - Channel presence tracking
//!
//! Mirrors the membership of the channel the bot occupies and pauses or
//! resumes playback when the channel becomes empty or repopulated.

mod tracker;

// Public exports
pub use tracker::PresenceTracker;
