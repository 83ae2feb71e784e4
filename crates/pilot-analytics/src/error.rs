//! Error types for configuration and input loading.
//!
//! The analytics core itself is infallible: missing or malformed lap data
//! degrades to `None`/empty output. Only loading documents from disk and
//! validating configuration can fail.

use std::path::PathBuf;

/// Error type for pilot analytics configuration and input handling.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A configuration value failed validation.
    #[error("Invalid analytics configuration: {0}")]
    InvalidConfiguration(String),

    /// Reading a document from disk failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML document could not be decoded.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AnalyticsError {
    /// Build an [`AnalyticsError::InvalidConfiguration`] from any message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// True when the error originates from decoding or validating content
    /// rather than from the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::Json(_) | Self::Yaml(_)
        )
    }
}

/// A specialized `Result` type for pilot analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
