//! Error types for pilotctl

use std::path::PathBuf;

use pilot_analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Slot not found: {0} (chart has {1} slots, gaps have no description)")]
    SlotNotFound(usize, usize),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_) => 2,
            Self::SlotNotFound(..) => 3,
            Self::ValidationError(_)
            | Self::InvalidConfiguration(_)
            | Self::JsonError(_)
            | Self::YamlError(_) => 4,
            Self::Analytics(err) if err.is_validation() => 4,
            Self::IoError(_) | Self::Analytics(_) => 1,
        }
    }
}
