//! Resolved unit of work

use chorus_core::{CatalogProvider, ContentReference};
use std::fmt;
use std::sync::Arc;

/// Default result-count limit when the command names none
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// A fully resolved playback request
///
/// Constructed once per command invocation by the [`crate::Resolver`];
/// read-only thereafter. A limit of 0 means unlimited.
pub struct PlaybackRequest {
    provider: Arc<dyn CatalogProvider>,
    reference: ContentReference,
    text: String,
    limit: usize,
}

impl PlaybackRequest {
    pub(crate) fn new(
        provider: Arc<dyn CatalogProvider>,
        reference: ContentReference,
        text: String,
        limit: usize,
    ) -> Self {
        Self {
            provider,
            reference,
            text,
            limit,
        }
    }

    /// The chosen provider
    pub fn provider(&self) -> &Arc<dyn CatalogProvider> {
        &self.provider
    }

    /// Classification of the input text
    pub fn reference(&self) -> &ContentReference {
        &self.reference
    }

    /// The search/reference text after markup stripping and token handling
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Result-count limit (0 = unlimited)
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Debug for PlaybackRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackRequest")
            .field("provider", &self.provider.tag().as_str())
            .field("reference", &self.reference)
            .field("text", &self.text)
            .field("limit", &self.limit)
            .finish()
    }
}
