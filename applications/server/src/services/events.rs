/// Event pumps: backend notifications into the core
///
/// Subscriptions are owned here and torn down with the pumps; nothing
/// registers listeners on ambient shared objects.
use crate::services::Orchestrator;
use chorus_core::{ChannelEvent, PlaybackEvent};
use chorus_presence::PresenceTracker;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Running pump tasks for playback and channel events
pub struct EventPumps {
    playback: JoinHandle<()>,
    channel: JoinHandle<()>,
}

impl EventPumps {
    /// Spawn both pumps; they run until their senders drop or `shutdown`
    pub fn spawn(
        orchestrator: Arc<Orchestrator>,
        presence: Arc<PresenceTracker>,
        mut playback_rx: UnboundedReceiver<PlaybackEvent>,
        mut channel_rx: UnboundedReceiver<ChannelEvent>,
    ) -> Self {
        let playback = tokio::spawn(async move {
            while let Some(event) = playback_rx.recv().await {
                match event {
                    PlaybackEvent::TrackFinished => orchestrator.on_track_finished().await,
                }
            }
            tracing::debug!("playback event pump stopped");
        });

        let channel = tokio::spawn(async move {
            while let Some(event) = channel_rx.recv().await {
                if let Err(error) = presence.handle_event(event).await {
                    tracing::warn!(%error, "channel event handling failed");
                }
            }
            tracing::debug!("channel event pump stopped");
        });

        Self { playback, channel }
    }

    /// Abort both pumps
    pub fn shutdown(self) {
        self.playback.abort();
        self.channel.abort();
    }
}
