//! Free-text command resolution
//!
//! Ordered heuristics turn raw text into a provider + content reference +
//! result limit. Provider scans run in registration order, first match
//! wins, so the outcome is reproducible for a given configuration.

use crate::registry::ProviderRegistry;
use crate::request::{PlaybackRequest, DEFAULT_RESULT_LIMIT};
use chorus_core::{CatalogProvider, ContentReference, Error, Result};
use std::sync::Arc;

/// Default token budget for commands that may name a provider and a limit
pub const DEFAULT_MAX_TOKENS: usize = 3;

/// Turns raw command text into a [`PlaybackRequest`]
pub struct Resolver {
    registry: Arc<ProviderRegistry>,
}

impl Resolver {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve raw text against the registered providers
    ///
    /// Steps:
    /// 1. Strip markup decoration and split on whitespace.
    /// 2. Collapse overflow tokens beyond `max_tokens` into the final
    ///    token, rejoined with single spaces.
    /// 3. Pop a trailing `max`/numeric limit token (`max` = unlimited).
    /// 4. A leading token matching a configured alias selects that
    ///    provider; otherwise the whole text is fed to the heuristics:
    ///    URL-fragment scan, then classifier probe, then the configured
    ///    default provider.
    /// 5. Classify through the chosen provider if no classification was
    ///    kept from the probe.
    pub async fn resolve(&self, raw: &str, max_tokens: usize) -> Result<PlaybackRequest> {
        let cleaned = strip_markup(raw);
        let mut tokens: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(Error::invalid_argument("empty command text"));
        }

        if max_tokens > 0 && tokens.len() > max_tokens {
            let tail = tokens.split_off(max_tokens - 1).join(" ");
            tokens.push(tail);
        }

        let mut limit = DEFAULT_RESULT_LIMIT;
        if tokens.len() >= 2 {
            let last = tokens.last().map(String::as_str).unwrap_or_default();
            if last == "max" {
                limit = 0;
                tokens.pop();
            } else if tokens.len() <= 4 && is_number(last) {
                limit = last
                    .parse()
                    .map_err(|_| Error::invalid_argument(format!("bad limit: {last}")))?;
                tokens.pop();
            }
        }

        let mut provider: Option<Arc<dyn CatalogProvider>> = None;
        let mut reference: Option<ContentReference> = None;

        if tokens.len() >= 2 {
            let head = &tokens[0];
            if self.registry.knows_alias(head) {
                // Disabled aliases fail here rather than falling through.
                provider = Some(self.registry.by_alias(head)?);
                tokens.remove(0);
            }
        }
        let text = tokens.join(" ");

        if provider.is_none() {
            provider = self.scan_url_fragments(&text);
        }
        if provider.is_none() {
            (provider, reference) = self.probe_classifiers(&text).await;
        }
        let provider = match provider {
            Some(provider) => provider,
            None => self.registry.default_provider()?,
        };

        let reference = match reference {
            Some(reference) => reference,
            None => provider.classify_input(&text).await?,
        };

        Ok(PlaybackRequest::new(provider, reference, text, limit))
    }

    /// First enabled provider whose recognized URL substring appears in
    /// the text, in registration order
    fn scan_url_fragments(&self, text: &str) -> Option<Arc<dyn CatalogProvider>> {
        for provider in self.registry.enabled() {
            for fragment in provider.url_fragments() {
                if text.contains(&fragment) {
                    return Some(provider.clone());
                }
            }
        }
        None
    }

    /// First enabled provider whose classifier returns a non-`None`
    /// classification, keeping that classification
    async fn probe_classifiers(
        &self,
        text: &str,
    ) -> (Option<Arc<dyn CatalogProvider>>, Option<ContentReference>) {
        for provider in self.registry.enabled() {
            match provider.classify_input(text).await {
                Ok(reference) if !reference.is_none() => {
                    return (Some(provider.clone()), Some(reference));
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::debug!(provider = %provider.tag(), %error, "classifier probe failed");
                }
            }
        }
        (None, None)
    }
}

/// Remove `[...]` markup decoration (link/formatting tags)
fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '[' {
            for inner in chars.by_ref() {
                if inner == ']' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
