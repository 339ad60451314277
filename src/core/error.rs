//! Error types and error handling for stemdex.
//!
//! Errors fall into four groups: configuration errors abort before any
//! work starts, per-document errors are logged and skipped by the
//! builders and the crawler, export errors are returned to the caller of
//! that export only, and interrupted waits surface as `Interrupted`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stemdex operations
pub type Result<T> = std::result::Result<T, StemdexError>;

/// Main error type for stemdex
#[derive(Error, Debug)]
pub enum StemdexError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Wait interrupted: {0}")]
    Interrupted(String),

    #[error("Failed to export {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: Box<StemdexError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl StemdexError {
    /// Wrap an error raised while writing `path`
    pub fn export(path: impl Into<PathBuf>, source: impl Into<StemdexError>) -> Self {
        StemdexError::Export {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Check if this error must abort the run before work starts
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StemdexError::ConfigError(_) | StemdexError::TomlError(_)
        )
    }

    /// Check if this error only affects a single document
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            StemdexError::IndexingFailed(_) | StemdexError::InvalidUrl(_)
        )
    }
}
