/// Core error types for Chorus
use thiserror::Error;

/// Result type alias using `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Chorus
///
/// Benign conditions (empty queue, nothing playing) are never errors;
/// components report those through explicit status values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty or malformed command text
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No provider matches the given alias or tag
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// The provider exists but is disabled in configuration
    #[error("Provider disabled: {0}")]
    ProviderDisabled(String),

    /// A search yielded no results
    #[error("Not found: {0}")]
    NotFound(String),

    /// Shared-secret mismatch at the HTTP boundary
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Catalog provider I/O failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// Playback pipeline failure
    #[error("Playback error: {0}")]
    Playback(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Any other failure
    #[error("{0}")]
    Unexpected(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a provider-not-found error
    pub fn provider_not_found(name: impl Into<String>) -> Self {
        Self::ProviderNotFound(name.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider I/O error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a playback pipeline error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}
