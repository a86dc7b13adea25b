/// Playback orchestrator
///
/// Single entry point shared by the text-command front-end and the HTTP
/// API. Every cursor-affecting decide-and-start sequence runs under the
/// engine mutex, so at most one advance decision is in flight at a time.
use chorus_core::{
    CatalogProvider, ContentReference, Error, PlayMode, PlaybackControl, ProviderStatus,
    ProviderTag, Result, StatusSink, Track, TrackList,
};
use chorus_playback::{AdvanceOutcome, PlayerEngine};
use chorus_resolver::{PlaybackRequest, ProviderRegistry, Resolver, DEFAULT_MAX_TOKENS};
use serde::Serialize;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Token budget for track commands: optional provider alias + free text;
/// playlist/album commands use the resolver default, which also admits a
/// trailing limit token
const TRACK_COMMAND_TOKENS: usize = 2;

/// HTTP search limit bounds
const SEARCH_LIMIT_MAX: usize = 50;
const SEARCH_LIMIT_DEFAULT: usize = 10;

/// Status text shown when playback has drained
const IDLE_STATUS: &str = "Nothing playing";

/// Callback invoked whenever the play mode changes, e.g. to persist it
pub type ModeChangeHook = Box<dyn Fn(PlayMode) + Send + Sync>;

/// Read-only playback snapshot for the status surfaces
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackStatus {
    pub current: Option<Track>,
    pub upcoming: Vec<Track>,
    pub mode: PlayMode,
    pub paused: bool,
    pub queue_length: usize,
}

/// What a search should look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Song,
    List,
    Album,
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "song" | "track" => Ok(SearchKind::Song),
            "list" | "playlist" => Ok(SearchKind::List),
            "album" => Ok(SearchKind::Album),
            other => Err(Error::invalid_argument(format!(
                "unknown search type: {other}"
            ))),
        }
    }
}

/// Search hits from one provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSearchResult {
    pub provider: ProviderTag,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<Track>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<chorus_core::CatalogEntry>,
}

pub struct Orchestrator {
    engine: Mutex<PlayerEngine>,
    registry: RwLock<Arc<ProviderRegistry>>,
    control: Arc<dyn PlaybackControl>,
    status_sink: Option<Arc<dyn StatusSink>>,
    on_mode_change: Option<ModeChangeHook>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        control: Arc<dyn PlaybackControl>,
        mode: PlayMode,
    ) -> Self {
        Self {
            engine: Mutex::new(PlayerEngine::new(control.clone(), mode)),
            registry: RwLock::new(registry),
            control,
            status_sink: None,
            on_mode_change: None,
        }
    }

    /// Swap in a freshly built provider registry after a config reload
    ///
    /// In-flight operations keep the registry snapshot they resolved
    /// against; queue contents are untouched.
    pub fn reload_providers(&self, registry: Arc<ProviderRegistry>) {
        tracing::info!(providers = registry.len(), "provider registry reloaded");
        *self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner) = registry;
    }

    fn registry(&self) -> Arc<ProviderRegistry> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.registry())
    }

    /// Attach a sink for user-visible status text (bot description etc.)
    pub fn with_status_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.status_sink = Some(sink);
        self
    }

    /// Attach a hook called after every successful mode change
    pub fn with_mode_hook(mut self, hook: ModeChangeHook) -> Self {
        self.on_mode_change = Some(hook);
        self
    }

    /// Resolve free text and start playing the result
    ///
    /// Playlist/album classifications delegate to the list paths in
    /// replace mode. Under a loop mode the track is also enqueued at the
    /// tail so it participates in subsequent advancement.
    pub async fn play(&self, raw: &str) -> Result<String> {
        let request = self.resolver().resolve(raw, TRACK_COMMAND_TOKENS).await?;
        self.play_request(request).await
    }

    /// Play an already resolved request
    pub async fn play_request(&self, request: PlaybackRequest) -> Result<String> {
        match request.reference() {
            ContentReference::PlayList(_) | ContentReference::Podcast(_) => {
                self.run_playlist(request, false).await
            }
            ContentReference::Album(_) => self.run_album(request, false).await,
            _ => {
                let track = self.resolve_track(&request).await?;
                let mut engine = self.engine.lock().await;
                if engine.mode().is_loop() {
                    engine.add_music(track.clone(), false);
                }
                engine.play_track(track.clone()).await?;
                drop(engine);
                self.announce(&track).await;
                Ok(format!("Playing: {} - {}", track.title, track.artist))
            }
        }
    }

    /// Resolve free text and enqueue the result as immediate-next
    ///
    /// Never starts playback itself. Playlist/album classifications
    /// delegate to the list paths in append mode.
    pub async fn add(&self, raw: &str) -> Result<String> {
        let request = self.resolver().resolve(raw, TRACK_COMMAND_TOKENS).await?;
        self.add_request(request).await
    }

    /// Enqueue an already resolved request
    pub async fn add_request(&self, request: PlaybackRequest) -> Result<String> {
        match request.reference() {
            ContentReference::PlayList(_) | ContentReference::Podcast(_) => {
                self.run_playlist(request, true).await
            }
            ContentReference::Album(_) => self.run_album(request, true).await,
            _ => {
                let track = self.resolve_track(&request).await?;
                let mut engine = self.engine.lock().await;
                engine.add_music(track.clone(), true);
                drop(engine);
                Ok(format!("Queued next: {} - {}", track.title, track.artist))
            }
        }
    }

    /// Resolve free text as a playlist and play or append it
    pub async fn play_playlist(&self, raw: &str, append: bool) -> Result<String> {
        let request = self.resolver().resolve(raw, DEFAULT_MAX_TOKENS).await?;
        self.run_playlist(request, append).await
    }

    /// Resolve free text as an album and play or append it
    pub async fn play_album(&self, raw: &str, append: bool) -> Result<String> {
        let request = self.resolver().resolve(raw, DEFAULT_MAX_TOKENS).await?;
        self.run_album(request, append).await
    }

    /// Change the play mode by numeric value (0..=3)
    pub async fn set_mode(&self, value: u8) -> Result<String> {
        let mode = PlayMode::from_index(value)
            .ok_or_else(|| Error::invalid_argument(format!("play mode must be 0..=3, got {value}")))?;
        self.engine.lock().await.set_mode(mode);
        if let Some(hook) = &self.on_mode_change {
            hook(mode);
        }
        Ok(format!("Play mode set to {mode}"))
    }

    /// The active play mode
    pub async fn mode(&self) -> PlayMode {
        self.engine.lock().await.mode()
    }

    /// Stop the current track (queue untouched)
    pub async fn stop(&self) -> Result<String> {
        self.control.stop().await?;
        self.engine.lock().await.clear_current();
        self.set_idle_status().await;
        Ok("Playback stopped".to_string())
    }

    pub async fn pause(&self) -> Result<String> {
        self.control.set_paused(true).await?;
        Ok("Playback paused".to_string())
    }

    pub async fn resume(&self) -> Result<String> {
        self.control.set_paused(false).await?;
        Ok("Playback resumed".to_string())
    }

    /// Advance to the next track per the active mode
    pub async fn play_next(&self) -> Result<String> {
        let mut engine = self.engine.lock().await;
        match engine.advance_to_next().await? {
            AdvanceOutcome::Started(track) => {
                drop(engine);
                self.announce(&track).await;
                Ok(format!("Now playing: {} - {}", track.title, track.artist))
            }
            AdvanceOutcome::QueueEmpty => {
                drop(engine);
                self.set_idle_status().await;
                Ok("Queue is empty".to_string())
            }
        }
    }

    /// Empty the queue; the accompanying stop runs as a separate task
    ///
    /// The returned handle may be awaited, but callers are free to drop
    /// it. A finished notification racing this call finds an empty queue
    /// and becomes a no-op.
    pub async fn clear(&self) -> JoinHandle<()> {
        {
            let mut engine = self.engine.lock().await;
            engine.clear();
            engine.clear_current();
        }
        let control = Arc::clone(&self.control);
        tokio::spawn(async move {
            if let Err(error) = control.stop().await {
                tracing::warn!(%error, "stop after clear failed");
            }
        })
    }

    /// Log in to a provider by alias
    pub async fn login(&self, provider: &str, args: &[String]) -> Result<String> {
        self.registry().by_alias(provider)?.login(args).await
    }

    /// Snapshot for the status surfaces
    pub async fn playback_status(&self, upcoming: usize) -> PlaybackStatus {
        let engine = self.engine.lock().await;
        let status = PlaybackStatus {
            current: engine.current_track().cloned(),
            upcoming: engine.upcoming(upcoming),
            mode: engine.mode(),
            paused: false,
            queue_length: engine.queue_len(),
        };
        drop(engine);
        PlaybackStatus {
            paused: self.control.is_paused().await,
            ..status
        }
    }

    /// Numbered queue listing for chat display
    pub async fn queue_summary(&self) -> String {
        self.engine.lock().await.summary_text(20)
    }

    /// Login/server state of every enabled provider
    pub async fn provider_statuses(&self) -> Vec<ProviderStatus> {
        let registry = self.registry();
        let mut statuses = Vec::new();
        for provider in registry.enabled() {
            let user = match provider.current_user().await {
                Ok(user) => user,
                Err(error) => {
                    tracing::warn!(provider = %provider.tag(), %error, "user lookup failed");
                    None
                }
            };
            statuses.push(ProviderStatus {
                tag: provider.tag().clone(),
                name: provider.name().to_string(),
                server: provider.server_descriptor(),
                user,
            });
        }
        statuses
    }

    /// Bounded catalog search across one or all enabled providers
    ///
    /// The limit is clamped to 1..=50 and defaults to 10.
    pub async fn search(
        &self,
        provider: Option<&str>,
        kind: SearchKind,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ProviderSearchResult>> {
        if text.trim().is_empty() {
            return Err(Error::invalid_argument("empty search text"));
        }
        let limit = limit.unwrap_or(SEARCH_LIMIT_DEFAULT).clamp(1, SEARCH_LIMIT_MAX);

        if let Some(alias) = provider {
            let provider = self.registry().by_alias(alias)?;
            let result = self.search_one(&provider, kind, text, limit).await?;
            return Ok(vec![result]);
        }

        let registry = self.registry();
        let mut results = Vec::new();
        for provider in registry.enabled() {
            match self.search_one(provider, kind, text, limit).await {
                Ok(result) => results.push(result),
                Err(error) => {
                    tracing::warn!(provider = %provider.tag(), %error, "search failed");
                }
            }
        }
        Ok(results)
    }

    /// Handle the asynchronous "track finished" notification
    ///
    /// Empty queue sets the idle status; anything else advances. Failures
    /// are logged, never propagated, so a flaky provider cannot take the
    /// pump down.
    pub async fn on_track_finished(&self) {
        let mut engine = self.engine.lock().await;
        if engine.is_queue_empty() {
            engine.clear_current();
            drop(engine);
            self.set_idle_status().await;
            return;
        }
        match engine.advance_to_next().await {
            Ok(AdvanceOutcome::Started(track)) => {
                drop(engine);
                self.announce(&track).await;
            }
            Ok(AdvanceOutcome::QueueEmpty) => {
                drop(engine);
                self.set_idle_status().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to start next track");
            }
        }
    }

    async fn run_playlist(&self, request: PlaybackRequest, append: bool) -> Result<String> {
        let provider = request.provider().clone();
        let id = match request.reference() {
            ContentReference::PlayList(id) | ContentReference::Podcast(id) => id.clone(),
            _ => {
                let hits = provider.search_playlist(request.text(), 1).await?;
                hits.into_iter()
                    .next()
                    .ok_or_else(|| {
                        Error::not_found(format!("no playlists match '{}'", request.text()))
                    })?
                    .id
            }
        };
        let list = provider.get_playlist(&id, request.limit()).await?;
        self.apply_list(list, request.limit(), append).await
    }

    async fn run_album(&self, request: PlaybackRequest, append: bool) -> Result<String> {
        let provider = request.provider().clone();
        let id = match request.reference() {
            ContentReference::Album(id) => id.clone(),
            _ => {
                let hits = provider.search_album(request.text(), 1).await?;
                hits.into_iter()
                    .next()
                    .ok_or_else(|| {
                        Error::not_found(format!("no albums match '{}'", request.text()))
                    })?
                    .id
            }
        };
        let list = provider.get_album(&id, request.limit()).await?;
        self.apply_list(list, request.limit(), append).await
    }

    async fn apply_list(&self, list: TrackList, limit: usize, append: bool) -> Result<String> {
        if list.is_empty() {
            return Err(Error::not_found(format!("'{}' has no tracks", list.label)));
        }
        let label = list.label.clone();
        let mut engine = self.engine.lock().await;
        if append {
            let added = engine.add_playlist(list.tracks, limit);
            drop(engine);
            return Ok(format!("Queued {added} tracks from {label}"));
        }
        engine.set_playlist(label.clone(), list.tracks, limit);
        match engine.advance_to_next().await? {
            AdvanceOutcome::Started(track) => {
                drop(engine);
                self.announce(&track).await;
                Ok(format!(
                    "Playing {label}: {} - {}",
                    track.title, track.artist
                ))
            }
            AdvanceOutcome::QueueEmpty => Ok(format!("{label} is empty")),
        }
    }

    /// Search-or-fetch for a single track
    async fn resolve_track(&self, request: &PlaybackRequest) -> Result<Track> {
        match request.reference() {
            ContentReference::Track(id) => request.provider().get_track(id).await,
            _ => {
                let hits = request.provider().search_track(request.text(), 1).await?;
                hits.into_iter().next().ok_or_else(|| {
                    Error::not_found(format!("no tracks match '{}'", request.text()))
                })
            }
        }
    }

    async fn search_one(
        &self,
        provider: &Arc<dyn CatalogProvider>,
        kind: SearchKind,
        text: &str,
        limit: usize,
    ) -> Result<ProviderSearchResult> {
        let mut result = ProviderSearchResult {
            provider: provider.tag().clone(),
            tracks: Vec::new(),
            entries: Vec::new(),
        };
        match kind {
            SearchKind::Song => result.tracks = provider.search_track(text, limit).await?,
            SearchKind::List => result.entries = provider.search_playlist(text, limit).await?,
            SearchKind::Album => result.entries = provider.search_album(text, limit).await?,
        }
        Ok(result)
    }

    async fn announce(&self, track: &Track) {
        if let Some(sink) = &self.status_sink {
            let text = format!("{} - {}", track.title, track.artist);
            if let Err(error) = sink.set_status(&text).await {
                tracing::warn!(%error, "status update failed");
            }
        }
    }

    async fn set_idle_status(&self) {
        if let Some(sink) = &self.status_sink {
            if let Err(error) = sink.set_status(IDLE_STATUS).await {
                tracing::warn!(%error, "status update failed");
            }
        }
    }
}
