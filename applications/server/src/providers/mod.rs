/// Provider construction
///
/// A static table maps provider kinds to constructors; it is consulted at
/// startup and on explicit reload. No reflection, no ambient registries.
use crate::config::{ProviderSettings, ServerConfig};
use crate::error::{Result, ServerError};
use chorus_core::{CatalogProvider, ProviderTag};
use chorus_resolver::ProviderRegistry;
use std::sync::Arc;

pub mod library;

pub use library::LibraryProvider;

type BuildFn = fn(&ProviderSettings) -> Result<Arc<dyn CatalogProvider>>;

/// One entry of the static provider factory table
pub struct ProviderFactory {
    pub kind: &'static str,
    pub build: BuildFn,
}

fn build_library(settings: &ProviderSettings) -> Result<Arc<dyn CatalogProvider>> {
    Ok(Arc::new(LibraryProvider::load(settings.option("catalog")?)?))
}

/// All known provider kinds
pub fn factories() -> &'static [ProviderFactory] {
    const FACTORIES: &[ProviderFactory] = &[ProviderFactory {
        kind: "library",
        build: build_library,
    }];
    FACTORIES
}

fn factory_for(kind: &str) -> Result<&'static ProviderFactory> {
    factories()
        .iter()
        .find(|f| f.kind == kind)
        .ok_or_else(|| ServerError::Config(format!("unknown provider kind: {kind}")))
}

/// Build the provider registry from configuration
///
/// Providers register in configuration order; that order drives every
/// resolver heuristic. Disabled providers are registered too so their
/// aliases produce a distinct error.
pub fn build_registry(config: &ServerConfig) -> Result<ProviderRegistry> {
    let default_tag = ProviderTag::new(config.playback.default_provider.clone());
    let mut registry = ProviderRegistry::new(default_tag);

    for settings in &config.providers {
        let factory = factory_for(&settings.kind)?;
        let provider = (factory.build)(settings)?;
        tracing::info!(
            kind = settings.kind,
            tag = %provider.tag(),
            enabled = settings.enabled,
            "provider configured"
        );
        registry.register(provider, settings.aliases.clone(), settings.enabled);
    }

    Ok(registry)
}
