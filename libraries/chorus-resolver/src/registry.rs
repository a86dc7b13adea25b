//! Ordered provider registry
//!
//! Registration order is configuration order; every heuristic that scans
//! providers iterates in that order and takes the first match.

use chorus_core::{CatalogProvider, Error, ProviderTag, Result};
use std::sync::Arc;

struct Entry {
    provider: Arc<dyn CatalogProvider>,
    aliases: Vec<String>,
    enabled: bool,
}

impl Entry {
    fn matches(&self, name: &str) -> bool {
        self.provider.tag().as_str().eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Registry of configured catalog providers
///
/// Disabled providers stay registered so their aliases resolve to a
/// distinct `ProviderDisabled` error instead of "not found".
pub struct ProviderRegistry {
    entries: Vec<Entry>,
    default_tag: ProviderTag,
}

impl ProviderRegistry {
    /// Create a registry whose fallback is the provider tagged `default_tag`
    pub fn new(default_tag: ProviderTag) -> Self {
        Self {
            entries: Vec::new(),
            default_tag,
        }
    }

    /// Register a provider at the end of the iteration order
    pub fn register(
        &mut self,
        provider: Arc<dyn CatalogProvider>,
        aliases: Vec<String>,
        enabled: bool,
    ) {
        self.entries.push(Entry {
            provider,
            aliases,
            enabled,
        });
    }

    /// Enabled providers in registration order
    pub fn enabled(&self) -> impl Iterator<Item = &Arc<dyn CatalogProvider>> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| &e.provider)
    }

    /// Look up an *enabled* provider by alias or tag (case-insensitive)
    pub fn by_alias(&self, name: &str) -> Result<Arc<dyn CatalogProvider>> {
        match self.entries.iter().find(|e| e.matches(name)) {
            Some(entry) if entry.enabled => Ok(entry.provider.clone()),
            Some(_) => Err(Error::ProviderDisabled(name.to_string())),
            None => Err(Error::ProviderNotFound(name.to_string())),
        }
    }

    /// Whether any entry (enabled or not) answers to `name`
    pub fn knows_alias(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.matches(name))
    }

    /// The configured default provider
    pub fn default_provider(&self) -> Result<Arc<dyn CatalogProvider>> {
        self.by_alias(self.default_tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
