//! Core error types.

use thiserror::Error;

/// Errors raised while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid preferences: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] ron::Error),
}
