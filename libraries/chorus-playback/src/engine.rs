//! Player engine: queue decisions coupled to playback control
//!
//! The engine owns the queue and the active mode, and is the only place
//! that both moves the cursor and starts a track. Callers wrap it in a
//! single mutex so at most one decide-and-start sequence runs at a time.

use crate::queue::PlayQueue;
use chorus_core::{PlayMode, PlaybackControl, Result, Track};
use std::sync::Arc;

/// Result of an advance decision
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The next track was selected and started
    Started(Track),

    /// Nothing remains under the active mode's termination rule
    QueueEmpty,
}

/// Queue/mode engine
///
/// Exclusively owns the [`PlayQueue`] and the active [`PlayMode`];
/// mutations happen only through these operations.
pub struct PlayerEngine {
    queue: PlayQueue,
    mode: PlayMode,
    current: Option<Track>,
    control: Arc<dyn PlaybackControl>,
}

impl PlayerEngine {
    pub fn new(control: Arc<dyn PlaybackControl>, mode: PlayMode) -> Self {
        Self {
            queue: PlayQueue::new(),
            mode,
            current: None,
            control,
        }
    }

    /// Active play mode
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Change the play mode
    ///
    /// Takes effect on the next advance decision, never retroactively.
    pub fn set_mode(&mut self, mode: PlayMode) {
        tracing::info!(%mode, "play mode changed");
        self.mode = mode;
    }

    /// Replace the queue wholesale (cursor resets to "before first")
    pub fn set_playlist(&mut self, label: impl Into<String>, tracks: Vec<Track>, limit: usize) {
        self.queue.set_playlist(label, tracks, limit);
        tracing::debug!(len = self.queue.len(), "queue replaced");
    }

    /// Extend the queue at the tail; returns the number of tracks added
    pub fn add_playlist(&mut self, tracks: Vec<Track>, limit: usize) -> usize {
        let added = self.queue.add_playlist(tracks, limit);
        tracing::debug!(added, len = self.queue.len(), "queue extended");
        added
    }

    /// Insert a single track, either as immediate-next or at the tail
    pub fn add_music(&mut self, track: Track, as_next: bool) {
        self.queue.add_music(track, as_next);
    }

    /// Empty the queue and reset the cursor
    ///
    /// Does not stop an in-progress track; that is a separate explicit
    /// stop through the playback control.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Start an ad-hoc track immediately, independent of the queue cursor
    ///
    /// The track is recorded as currently playing for status queries even
    /// when it is not enqueued.
    pub async fn play_track(&mut self, track: Track) -> Result<()> {
        tracing::info!(title = %track.title, "starting track");
        self.control.start(&track).await?;
        self.current = Some(track);
        Ok(())
    }

    /// Select and start the next track per the active mode
    ///
    /// An empty result is an explicit status, never an error, so callers
    /// can update user-facing text instead of failing.
    pub async fn advance_to_next(&mut self) -> Result<AdvanceOutcome> {
        match self.queue.select_next(self.mode) {
            Some(index) => {
                // The index came from select_next, so the lookup cannot miss.
                let track = match self.queue.track(index) {
                    Some(track) => track.clone(),
                    None => return Ok(AdvanceOutcome::QueueEmpty),
                };
                tracing::info!(title = %track.title, mode = %self.mode, "advancing");
                self.control.start(&track).await?;
                self.current = Some(track.clone());
                Ok(AdvanceOutcome::Started(track))
            }
            None => {
                tracing::debug!(mode = %self.mode, "queue exhausted");
                self.current = None;
                Ok(AdvanceOutcome::QueueEmpty)
            }
        }
    }

    /// The track recorded as currently playing, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Forget the currently playing track after an explicit stop
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Up to `n` tracks after the cursor, in queue order
    pub fn upcoming(&self, n: usize) -> Vec<Track> {
        self.queue.upcoming(n)
    }

    /// Numbered queue listing for chat display
    pub fn summary_text(&self, max_lines: usize) -> String {
        self.queue.summary_text(max_lines)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
