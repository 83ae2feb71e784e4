//! pilotctl configuration file: analytics display settings plus the
//! recordings used to resolve playback links.
//!
//! ```yaml
//! analytics:
//!   padding_fraction: 0.05
//! playback:
//!   - label: Main stream
//!     url: https://video.example/event-1
//!     start_ms: 1700000000000
//!     end_ms: 1700003600000
//! ```

use std::path::Path;

use pilot_analytics::{AnalyticsConfig, PlaybackLink, PlaybackLinkResolver};
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

/// A recording covering `[start_ms, end_ms]` in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackRange {
    pub label: String,
    pub url: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl PlaybackRange {
    fn covers(&self, timestamp_ms: i64) -> bool {
        (self.start_ms..=self.end_ms).contains(&timestamp_ms)
    }

    fn link_at(&self, timestamp_ms: i64) -> PlaybackLink {
        let offset_ms = timestamp_ms.saturating_sub(self.start_ms).max(0);
        let offset_seconds = u64::try_from(offset_ms / 1000).unwrap_or(0);
        PlaybackLink {
            href: format!("{}?t={offset_seconds}s", self.url),
            label: self.label.clone(),
            offset_seconds,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub analytics: AnalyticsConfig,
    pub playback: Vec<PlaybackRange>,
}

impl CliConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(CliError::InvalidConfiguration(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        debug!(
            path = %path.display(),
            recordings = config.playback.len(),
            "loaded pilotctl config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CliError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        self.analytics.validate()?;
        if let Some(range) = self.playback.iter().find(|r| r.end_ms < r.start_ms) {
            return Err(CliError::InvalidConfiguration(format!(
                "playback range {:?} ends before it starts",
                range.label
            )));
        }
        if let Some(range) = self.playback.iter().find(|r| r.url.trim().is_empty()) {
            return Err(CliError::InvalidConfiguration(format!(
                "playback range {:?} has an empty url",
                range.label
            )));
        }
        Ok(())
    }
}

impl PlaybackLinkResolver for CliConfig {
    fn resolve(&self, timestamp_ms: Option<i64>) -> Option<PlaybackLink> {
        let timestamp_ms = timestamp_ms?;
        self.playback
            .iter()
            .find(|range| range.covers(timestamp_ms))
            .map(|range| range.link_at(timestamp_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const SAMPLE: &str = r##"
analytics:
  palette: ["#112233"]
playback:
  - label: Heats
    url: https://video.example/heats
    start_ms: 1000000
    end_ms: 2000000
  - label: Finals
    url: https://video.example/finals
    start_ms: 3000000
    end_ms: 4000000
"##;

    #[test]
    fn load_without_path_gives_defaults() -> TestResult {
        let config = CliConfig::load(None)?;
        assert_eq!(config, CliConfig::default());
        Ok(())
    }

    #[test]
    fn parses_analytics_and_playback() -> TestResult {
        let config = CliConfig::from_yaml_str(SAMPLE)?;
        assert_eq!(config.analytics.palette, vec!["#112233".to_string()]);
        assert_eq!(config.playback.len(), 2);
        Ok(())
    }

    #[test]
    fn resolves_link_inside_range() -> TestResult {
        let config = CliConfig::from_yaml_str(SAMPLE)?;
        let link = config.resolve(Some(3_042_500)).ok_or("expected a link")?;
        assert_eq!(link.label, "Finals");
        assert_eq!(link.offset_seconds, 42);
        assert_eq!(link.href, "https://video.example/finals?t=42s");
        Ok(())
    }

    #[test]
    fn no_link_outside_ranges_or_without_timestamp() -> TestResult {
        let config = CliConfig::from_yaml_str(SAMPLE)?;
        assert!(config.resolve(Some(2_500_000)).is_none());
        assert!(config.resolve(None).is_none());
        Ok(())
    }

    #[test]
    fn rejects_inverted_range() {
        let yaml = "playback:\n  - {label: x, url: u, start_ms: 10, end_ms: 5}\n";
        assert!(matches!(
            CliConfig::from_yaml_str(yaml),
            Err(CliError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_invalid_analytics_section() {
        let yaml = "analytics:\n  palette: []\n";
        assert!(matches!(
            CliConfig::from_yaml_str(yaml),
            Err(CliError::Analytics(_))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/pilotctl.yaml")));
        assert!(matches!(result, Err(CliError::InvalidConfiguration(_))));
    }
}
