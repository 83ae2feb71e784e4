//! End-to-end pipeline: input document to every derived output.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::chart::{ChartStructure, build_chart_structure};
use crate::config::AnalyticsConfig;
use crate::describe::{PlaybackLinkResolver, SlotDescription, describe_slot};
use crate::domain::{ValueDomain, value_domain};
use crate::error::{AnalyticsError, Result};
use crate::lap_points::build_lap_points;
use crate::model::{AnalyticsInput, Lap, LapPoint};
use crate::new_best::{MarkerLine, NewBestIndices, detect_new_bests};
use crate::overlays::{OverlaySelection, OverlaySeries};
use crate::palette::RaceColors;

/// Every output derived from one [`AnalyticsInput`].
///
/// The bundle is a pure function of the input and configuration; running the
/// pipeline twice on the same input yields equal bundles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotAnalytics {
    /// One point per timeline lap, in timeline order.
    pub lap_points: Vec<LapPoint>,
    /// Running-best overlays aligned with `lap_points`.
    pub overlays: OverlaySeries,
    /// Display slots with race gaps and per-race ranges.
    pub structure: ChartStructure,
    /// Slots at which each metric set a record.
    pub new_best: NewBestIndices,
    /// One marker per record slot, de-duplicated by precedence.
    pub marker_lines: Vec<MarkerLine>,
    /// Race colors in race appearance order.
    pub race_colors: RaceColors,
    /// Consecutive window the overlay was computed with; `0` when disabled.
    pub consecutive_window: usize,
}

impl PilotAnalytics {
    /// Value-axis domain for the overlays the host has selected.
    pub fn value_domain(&self, selection: OverlaySelection, padding_fraction: f64) -> ValueDomain {
        value_domain(&self.lap_points, &self.overlays, selection, padding_fraction)
    }

    /// Describe slot `index`; see [`describe_slot`].
    pub fn describe<R>(
        &self,
        timeline: &[Lap],
        index: usize,
        resolver: &R,
        timestamp_format: &str,
    ) -> Option<SlotDescription>
    where
        R: PlaybackLinkResolver + ?Sized,
    {
        describe_slot(
            &self.structure,
            timeline,
            &self.new_best,
            index,
            resolver,
            timestamp_format,
        )
    }

    /// True when the input had no laps.
    pub fn is_empty(&self) -> bool {
        self.lap_points.is_empty()
    }
}

/// Run the pipeline with the default configuration.
pub fn analyze(input: &AnalyticsInput) -> PilotAnalytics {
    analyze_with(input, &AnalyticsConfig::default())
}

/// Run the pipeline: lap points, overlays, chart structure, new-best
/// detection and race colors, in that order.
pub fn analyze_with(input: &AnalyticsInput, config: &AnalyticsConfig) -> PilotAnalytics {
    let span = debug_span!(
        "analyze",
        laps = input.timeline.len(),
        races = input.lap_groups.len()
    );
    let _guard = span.enter();

    let consecutive_window = input.metrics.consecutive_window();
    let lap_points = build_lap_points(
        &input.timeline,
        &input.lap_groups,
        input.metrics.best_lap_time_seconds,
    );
    let overlays = OverlaySeries::compute(&lap_points, &input.lap_groups, consecutive_window);
    let structure = build_chart_structure(&lap_points, &overlays);
    let new_best = detect_new_bests(&structure);
    let marker_lines = new_best.marker_lines();
    let race_colors = RaceColors::assign(&input.lap_groups, &config.palette);

    debug!(
        slots = structure.len(),
        gaps = structure.gap_count(),
        markers = marker_lines.len(),
        "analytics complete"
    );

    PilotAnalytics {
        lap_points,
        overlays,
        structure,
        new_best,
        marker_lines,
        race_colors,
        consecutive_window,
    }
}

/// Read an [`AnalyticsInput`] JSON document from `path`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Io`] if the file cannot be read and
/// [`AnalyticsError::Json`] if it is not a valid input document.
pub fn load_input(path: &Path) -> Result<AnalyticsInput> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let input: AnalyticsInput = serde_json::from_str(&text)?;
    debug!(
        path = %path.display(),
        laps = input.timeline.len(),
        races = input.lap_groups.len(),
        "loaded analytics input"
    );
    Ok(input)
}
