/// Text command dispatcher
///
/// Maps chat-style commands onto orchestrator calls. Every failure is
/// recovered into a human-readable reply string; nothing propagates.
use crate::services::Orchestrator;
use chorus_core::{Error, Result};
use std::sync::Arc;

const HELP: &str = "Commands: play <text>, add <text>, playlist <text> [limit], \
album <text> [limit], mode <0-3>, next, start, stop, pause, clear, list, status, \
login <provider> <args...>";

pub struct CommandDispatcher {
    orchestrator: Arc<Orchestrator>,
}

impl CommandDispatcher {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Run one command line and produce the reply text
    pub async fn dispatch(&self, line: &str) -> String {
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (trimmed, ""),
        };

        let result = match command.to_ascii_lowercase().as_str() {
            "play" => self.orchestrator.play(rest).await,
            "add" => self.orchestrator.add(rest).await,
            "playlist" => self.orchestrator.play_playlist(rest, false).await,
            "album" => self.orchestrator.play_album(rest, false).await,
            "mode" => self.set_mode(rest).await,
            "next" => self.orchestrator.play_next().await,
            "start" => self.orchestrator.resume().await,
            "pause" => self.orchestrator.pause().await,
            "stop" => self.orchestrator.stop().await,
            "clear" => {
                // The stop task runs on its own; the reply does not wait.
                let _handle = self.orchestrator.clear().await;
                Ok("Queue cleared".to_string())
            }
            "list" => Ok(self.orchestrator.queue_summary().await),
            "status" => Ok(self.status_text().await),
            "login" => self.login(rest).await,
            "help" | "" => Ok(HELP.to_string()),
            other => Ok(format!("Unknown command: {other} (try 'help')")),
        };

        result.unwrap_or_else(|error| error.to_string())
    }

    async fn set_mode(&self, args: &str) -> Result<String> {
        let value: u8 = args
            .trim()
            .parse()
            .map_err(|_| Error::invalid_argument(format!("play mode must be 0..=3, got '{args}'")))?;
        self.orchestrator.set_mode(value).await
    }

    async fn login(&self, args: &str) -> Result<String> {
        let mut parts = args.split_whitespace();
        let provider = parts
            .next()
            .ok_or_else(|| Error::invalid_argument("usage: login <provider> <args...>"))?;
        let rest: Vec<String> = parts.map(str::to_string).collect();
        self.orchestrator.login(provider, &rest).await
    }

    async fn status_text(&self) -> String {
        let status = self.orchestrator.playback_status(3).await;
        match status.current {
            Some(track) => {
                let paused = if status.paused { ", paused" } else { "" };
                format!(
                    "Playing: {} - {} (mode {}{}, {} queued)",
                    track.title, track.artist, status.mode, paused, status.queue_length
                )
            }
            None => format!(
                "Nothing playing (mode {}, {} queued)",
                status.mode, status.queue_length
            ),
        }
    }
}
