//! Client error types.

use std::path::PathBuf;

use calwatch_core::TracingError;
use calwatch_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown time zone {0:?}")]
    UnknownTimezone(String),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tracing setup failed: {0}")]
    Tracing(#[from] TracingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
