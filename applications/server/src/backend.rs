/// Standalone playback/voice backends
///
/// The server core talks to playback and voice through the capability
/// traits; these implementations log instead of driving a real client,
/// which keeps the binary runnable without one.
use async_trait::async_trait;
use chorus_core::{
    ChannelDirectory, ChannelId, MemberId, PlaybackControl, PlaybackEvent, Result, StatusSink,
    Track,
};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

#[derive(Default)]
struct PlayerState {
    track: Option<Track>,
    paused: bool,
}

/// Playback control that records state and logs transport actions
pub struct ConsolePlayer {
    state: Mutex<PlayerState>,
    events: UnboundedSender<PlaybackEvent>,
}

impl ConsolePlayer {
    pub fn new(events: UnboundedSender<PlaybackEvent>) -> Self {
        Self {
            state: Mutex::new(PlayerState::default()),
            events,
        }
    }

    /// Mark the current track as finished and emit the notification
    pub async fn finish_current(&self) {
        let mut state = self.state.lock().await;
        if state.track.take().is_none() {
            return;
        }
        drop(state);
        // The receiver may already be gone during shutdown.
        let _ = self.events.send(PlaybackEvent::TrackFinished);
    }
}

#[async_trait]
impl PlaybackControl for ConsolePlayer {
    async fn start(&self, track: &Track) -> Result<()> {
        let mut state = self.state.lock().await;
        state.track = Some(track.clone());
        state.paused = false;
        tracing::info!(title = %track.title, artist = %track.artist, "playback started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.track = None;
        state.paused = false;
        tracing::info!("playback stopped");
        Ok(())
    }

    async fn set_paused(&self, paused: bool) -> Result<()> {
        self.state.lock().await.paused = paused;
        tracing::info!(paused, "pause state changed");
        Ok(())
    }

    async fn is_playing(&self) -> bool {
        self.state.lock().await.track.is_some()
    }

    async fn is_paused(&self) -> bool {
        self.state.lock().await.paused
    }
}

/// Channel directory backed by a fixed membership table
pub struct StaticDirectory {
    self_id: MemberId,
    channels: HashMap<ChannelId, Vec<MemberId>>,
}

impl StaticDirectory {
    pub fn new(self_id: MemberId) -> Self {
        Self {
            self_id,
            channels: HashMap::new(),
        }
    }

    pub fn with_channel(mut self, channel: ChannelId, members: Vec<MemberId>) -> Self {
        self.channels.insert(channel, members);
        self
    }
}

#[async_trait]
impl ChannelDirectory for StaticDirectory {
    fn self_id(&self) -> MemberId {
        self.self_id
    }

    async fn list_members(&self, channel: ChannelId) -> Result<Vec<MemberId>> {
        Ok(self.channels.get(&channel).cloned().unwrap_or_default())
    }
}

/// Status sink that writes to the log
pub struct LogStatusSink;

#[async_trait]
impl StatusSink for LogStatusSink {
    async fn set_status(&self, text: &str) -> Result<()> {
        tracing::info!(status = text, "status updated");
        Ok(())
    }
}
