/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub providers: Vec<ProviderSettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret for the HTTP API; unset disables the check
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Startup play mode, numeric 0..=3
    #[serde(default = "default_mode")]
    pub mode: u8,

    /// Pause when the bot's channel empties, resume when it repopulates
    #[serde(default = "default_auto_pause")]
    pub auto_pause: bool,

    /// Tag of the provider used when no heuristic picks one
    #[serde(default = "default_provider_tag")]
    pub default_provider: String,
}

/// One configured catalog provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Provider kind, matched against the static factory table
    pub kind: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Command aliases in addition to the provider tag
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Kind-specific options (e.g. `catalog` path for the library kind)
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl ProviderSettings {
    /// A required kind-specific option
    pub fn option(&self, key: &str) -> Result<&str> {
        self.options.get(key).map(String::as_str).ok_or_else(|| {
            ServerError::Config(format!(
                "provider '{}' is missing required option '{key}'",
                self.kind
            ))
        })
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Layering: the given file (or `config.toml` when present), then
    /// `CHORUS_`-prefixed environment variables on top.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from(path.unwrap_or("config.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CHORUS")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if chorus_core::PlayMode::from_index(self.playback.mode).is_none() {
            return Err(ServerError::Config(format!(
                "playback.mode must be 0..=3, got {}",
                self.playback.mode
            )));
        }

        if self.providers.iter().all(|p| !p.enabled) {
            return Err(ServerError::Config(
                "at least one enabled provider is required".to_string(),
            ));
        }

        let default = &self.playback.default_provider;
        let default_known = self
            .providers
            .iter()
            .filter(|p| p.enabled)
            .any(|p| p.kind == *default || p.aliases.iter().any(|a| a == default));
        if !default_known {
            return Err(ServerError::Config(format!(
                "playback.default_provider '{default}' does not name an enabled provider"
            )));
        }

        if let Some(secret) = &self.server.secret {
            if secret.is_empty() {
                return Err(ServerError::Config(
                    "server.secret must be non-empty when set (or omitted entirely)".to_string(),
                ));
            }
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        secret: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8087
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        mode: default_mode(),
        auto_pause: default_auto_pause(),
        default_provider: default_provider_tag(),
    }
}

fn default_mode() -> u8 {
    1
}

fn default_auto_pause() -> bool {
    true
}

fn default_provider_tag() -> String {
    "library".to_string()
}

fn default_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            playback: default_playback(),
            providers: Vec::new(),
        }
    }
}
