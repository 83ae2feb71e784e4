//! Presentation configuration for the analytics pipeline.
//!
//! The computational core takes no configuration. These settings only shape
//! what hosts display: race colors, value-axis padding and timestamp text.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::describe::is_valid_timestamp_format;
use crate::domain::DEFAULT_PADDING_FRACTION;
use crate::error::{AnalyticsError, Result};
use crate::palette::DEFAULT_PALETTE;

/// Embedded default configuration document.
pub const DEFAULT_ANALYTICS_YAML: &str = include_str!("default_analytics.yaml");

/// Default strftime pattern for lap timestamps.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display settings consumed by the pipeline and slot descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Race bar colors, `#rrggbb`, cycled in race appearance order.
    pub palette: Vec<String>,
    /// Value-axis headroom as a fraction of the value span.
    pub padding_fraction: f64,
    /// strftime pattern for lap timestamps.
    pub timestamp_format: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            padding_fraction: DEFAULT_PADDING_FRACTION,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate the embedded default document.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML is malformed or invalid.
    pub fn load_default() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_ANALYTICS_YAML)
    }

    /// Parse and validate a YAML document. Missing keys take default values.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Yaml`] on malformed input and
    /// [`AnalyticsError::InvalidConfiguration`] on invalid values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document. Missing keys take default values.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Json`] on malformed input and
    /// [`AnalyticsError::InvalidConfiguration`] on invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Io`] if the file cannot be read, otherwise
    /// any decoding or validation error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "loading analytics config");
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Check every value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(AnalyticsError::invalid_config("palette must not be empty"));
        }
        if let Some(bad) = self.palette.iter().find(|color| !is_hex_color(color)) {
            return Err(AnalyticsError::invalid_config(format!(
                "palette entry {bad:?} is not a #rrggbb color"
            )));
        }
        if !self.padding_fraction.is_finite() || self.padding_fraction < 0.0 {
            return Err(AnalyticsError::invalid_config(format!(
                "padding_fraction must be a finite non-negative number, got {}",
                self.padding_fraction
            )));
        }
        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(AnalyticsError::invalid_config(format!(
                "timestamp_format {:?} is not a valid strftime pattern",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
