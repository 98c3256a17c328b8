//! Network loading error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur while loading a network dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a local file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote server returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse dataset JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset parsed but does not form a valid network
    #[error("invalid network: {0}")]
    Network(#[from] DomainError),

    /// Neither a dataset path nor a URL was configured
    #[error("no network source: set NETWORK_PATH or NETWORK_URL")]
    NoSource,
}
