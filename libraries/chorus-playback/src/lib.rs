//! Chorus - Queue and play-mode engine
//!
//! This crate owns the ordered track queue, the play position cursor, and
//! the mode-dependent rule for selecting the next track.
//!
//! Two layers:
//! - [`PlayQueue`]: pure queue state (tracks, cursor, random-pass pool),
//!   fully synchronous and unit-testable
//! - [`PlayerEngine`]: couples queue decisions to a
//!   [`chorus_core::PlaybackControl`] so an advance both selects and
//!   starts the next track
//!
//! Callers serialize cursor-affecting operations externally (one mutex
//! around the engine); the engine itself never blocks on I/O beyond the
//! injected playback control.

mod engine;
mod queue;

// Public exports
pub use engine::{AdvanceOutcome, PlayerEngine};
pub use queue::PlayQueue;
