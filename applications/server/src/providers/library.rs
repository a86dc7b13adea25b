/// Local catalog provider
///
/// Serves searches and playlist/album lookups from a JSON catalog file.
/// Performs no network I/O; used standalone and in tests.
use async_trait::async_trait;
use chorus_core::{
    CatalogEntry, CatalogProvider, ContentReference, Error, ProviderTag, ProviderUser, Result,
    Track, TrackList,
};
use serde::Deserialize;
use std::path::Path;

const TAG: &str = "library";
const URL_SCHEME: &str = "library://";

/// On-disk catalog document
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryCatalog {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub tracks: Vec<CatalogTrack>,

    #[serde(default)]
    pub playlists: Vec<CatalogCollection>,

    #[serde(default)]
    pub albums: Vec<CatalogCollection>,
}

fn default_name() -> String {
    "Local Library".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
}

/// A playlist or album: a named, ordered list of track ids
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCollection {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub tracks: Vec<String>,
}

pub struct LibraryProvider {
    tag: ProviderTag,
    catalog: LibraryCatalog,
}

impl LibraryProvider {
    /// Load the catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog: LibraryCatalog = serde_json::from_str(&raw)?;
        tracing::info!(
            tracks = catalog.tracks.len(),
            playlists = catalog.playlists.len(),
            albums = catalog.albums.len(),
            "library catalog loaded"
        );
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: LibraryCatalog) -> Self {
        Self {
            tag: ProviderTag::new(TAG),
            catalog,
        }
    }

    fn to_track(&self, entry: &CatalogTrack) -> Track {
        Track {
            id: entry.id.clone(),
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            provider: self.tag.clone(),
        }
    }

    fn collection_tracks(&self, collection: &CatalogCollection, limit: usize) -> TrackList {
        let tracks = collection
            .tracks
            .iter()
            .filter_map(|id| {
                let found = self.catalog.tracks.iter().find(|t| t.id == *id);
                if found.is_none() {
                    tracing::debug!(id, collection = collection.name, "dangling track id");
                }
                found
            })
            .take(capped(limit))
            .map(|t| self.to_track(t))
            .collect();
        TrackList {
            label: collection.name.clone(),
            tracks,
        }
    }

    fn search_collections(
        collections: &[CatalogCollection],
        text: &str,
        limit: usize,
    ) -> Vec<CatalogEntry> {
        let needle = text.to_lowercase();
        collections
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .take(capped(limit))
            .map(|c| CatalogEntry {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect()
    }
}

/// Limit 0 means unlimited
fn capped(limit: usize) -> usize {
    if limit == 0 {
        usize::MAX
    } else {
        limit
    }
}

#[async_trait]
impl CatalogProvider for LibraryProvider {
    fn tag(&self) -> &ProviderTag {
        &self.tag
    }

    fn name(&self) -> &str {
        &self.catalog.name
    }

    fn server_descriptor(&self) -> String {
        format!("local catalog ({} tracks)", self.catalog.tracks.len())
    }

    fn url_fragments(&self) -> Vec<String> {
        vec![URL_SCHEME.to_string()]
    }

    /// `library://track/ID`, `library://playlist/ID`, `library://album/ID`
    async fn classify_input(&self, text: &str) -> Result<ContentReference> {
        let Some(rest) = text.trim().strip_prefix(URL_SCHEME) else {
            return Ok(ContentReference::None);
        };
        let reference = match rest.split_once('/') {
            Some(("track", id)) if !id.is_empty() => ContentReference::Track(id.to_string()),
            Some(("playlist", id)) if !id.is_empty() => ContentReference::PlayList(id.to_string()),
            Some(("album", id)) if !id.is_empty() => ContentReference::Album(id.to_string()),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "unrecognized library reference: {text}"
                )))
            }
        };
        Ok(reference)
    }

    async fn search_track(&self, text: &str, limit: usize) -> Result<Vec<Track>> {
        let needle = text.to_lowercase();
        Ok(self
            .catalog
            .tracks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.artist.to_lowercase().contains(&needle)
            })
            .take(capped(limit))
            .map(|t| self.to_track(t))
            .collect())
    }

    async fn search_playlist(&self, text: &str, limit: usize) -> Result<Vec<CatalogEntry>> {
        Ok(Self::search_collections(&self.catalog.playlists, text, limit))
    }

    async fn search_album(&self, text: &str, limit: usize) -> Result<Vec<CatalogEntry>> {
        Ok(Self::search_collections(&self.catalog.albums, text, limit))
    }

    async fn get_track(&self, id: &str) -> Result<Track> {
        self.catalog
            .tracks
            .iter()
            .find(|t| t.id == id)
            .map(|t| self.to_track(t))
            .ok_or_else(|| Error::not_found(format!("no track with id '{id}'")))
    }

    async fn get_playlist(&self, id: &str, limit: usize) -> Result<TrackList> {
        self.catalog
            .playlists
            .iter()
            .find(|c| c.id == id)
            .map(|c| self.collection_tracks(c, limit))
            .ok_or_else(|| Error::not_found(format!("no playlist with id '{id}'")))
    }

    async fn get_album(&self, id: &str, limit: usize) -> Result<TrackList> {
        self.catalog
            .albums
            .iter()
            .find(|c| c.id == id)
            .map(|c| self.collection_tracks(c, limit))
            .ok_or_else(|| Error::not_found(format!("no album with id '{id}'")))
    }

    async fn login(&self, _args: &[String]) -> Result<String> {
        Ok("The local library requires no login".to_string())
    }

    async fn current_user(&self) -> Result<Option<ProviderUser>> {
        Ok(None)
    }
}
