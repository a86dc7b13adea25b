/// Common test utilities and fixtures
use async_trait::async_trait;
use chorus_core::{PlayMode, PlaybackControl, Result, Track};
use chorus_resolver::ProviderRegistry;
use chorus_server::providers::library::{
    CatalogCollection, CatalogTrack, LibraryCatalog, LibraryProvider,
};
use chorus_server::services::Orchestrator;
use std::sync::{Arc, Mutex};

/// Playback control that records every call for assertions
#[derive(Default)]
pub struct RecordingControl {
    starts: Mutex<Vec<String>>,
    stops: Mutex<usize>,
    pauses: Mutex<Vec<bool>>,
}

impl RecordingControl {
    pub fn started_ids(&self) -> Vec<String> {
        self.starts.lock().unwrap().clone()
    }

    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }

    pub fn pause_writes(&self) -> Vec<bool> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackControl for RecordingControl {
    async fn start(&self, track: &Track) -> Result<()> {
        self.starts.lock().unwrap().push(track.id.clone());
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        *self.stops.lock().unwrap() += 1;
        Ok(())
    }

    async fn set_paused(&self, paused: bool) -> Result<()> {
        self.pauses.lock().unwrap().push(paused);
        Ok(())
    }

    async fn is_playing(&self) -> bool {
        !self.starts.lock().unwrap().is_empty()
    }

    async fn is_paused(&self) -> bool {
        self.pauses.lock().unwrap().last().copied().unwrap_or(false)
    }
}

fn catalog_track(id: &str, title: &str, artist: &str) -> CatalogTrack {
    CatalogTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

/// Three tracks, one playlist, one album
pub fn test_catalog() -> LibraryCatalog {
    LibraryCatalog {
        name: "Test Library".to_string(),
        tracks: vec![
            catalog_track("t1", "Morning Song", "Alice"),
            catalog_track("t2", "Evening Song", "Bob"),
            catalog_track("t3", "Night Drive", "Carol"),
        ],
        playlists: vec![CatalogCollection {
            id: "p1".to_string(),
            name: "Favorites".to_string(),
            tracks: vec!["t1".to_string(), "t2".to_string()],
        }],
        albums: vec![CatalogCollection {
            id: "a1".to_string(),
            name: "First Album".to_string(),
            tracks: vec!["t2".to_string(), "t3".to_string()],
        }],
    }
}

/// A catalog with `n` tracks all matching the query "song"
pub fn many_tracks(n: usize) -> LibraryCatalog {
    LibraryCatalog {
        name: "Big Library".to_string(),
        tracks: (0..n)
            .map(|i| catalog_track(&format!("t{i}"), &format!("Song {i}"), "Various"))
            .collect(),
        playlists: Vec::new(),
        albums: Vec::new(),
    }
}

/// Orchestrator over a library provider and a recording control
pub fn orchestrator_with(
    catalog: LibraryCatalog,
    mode: PlayMode,
) -> (Arc<Orchestrator>, Arc<RecordingControl>) {
    let mut registry = ProviderRegistry::new("library".into());
    registry.register(
        Arc::new(LibraryProvider::from_catalog(catalog)),
        vec!["lib".to_string()],
        true,
    );

    let control = Arc::new(RecordingControl::default());
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(registry),
        control.clone(),
        mode,
    ));
    (orchestrator, control)
}

pub fn test_orchestrator() -> (Arc<Orchestrator>, Arc<RecordingControl>) {
    orchestrator_with(test_catalog(), PlayMode::Sequential)
}
