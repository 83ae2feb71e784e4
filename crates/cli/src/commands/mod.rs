//! Command implementations for pilotctl

pub mod analyze;
pub mod describe;

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use pilot_analytics::{
    AnalyticsError, AnalyticsInput, FastestConsecutive, MetricSummary, OverlaySelection,
    load_input,
};
use tracing::info;

use crate::error::CliError;

/// Overlay lines that can be shown on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverlayKind {
    BestLap,
    Consecutive,
    RaceTotal,
}

/// Build the selection; no overlay flags means every overlay.
pub fn overlay_selection(kinds: &[OverlayKind]) -> OverlaySelection {
    if kinds.is_empty() {
        return OverlaySelection::ALL;
    }
    OverlaySelection {
        best_lap: kinds.contains(&OverlayKind::BestLap),
        consecutive: kinds.contains(&OverlayKind::Consecutive),
        race_total: kinds.contains(&OverlayKind::RaceTotal),
    }
}

/// Metric overrides shared by every command that runs the pipeline.
#[derive(Debug, Clone, Default, Args)]
pub struct MetricArgs {
    /// Consecutive-lap window (0 or 1 disables the consecutive overlay)
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Best lap time in seconds used for deltas
    #[arg(long, value_name = "SECONDS")]
    pub best_lap: Option<f64>,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Input document (JSON: timeline, lapGroups, metrics)
    pub input: PathBuf,

    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Overlay to include in the value domain (repeatable, default all)
    #[arg(long = "overlay", value_enum)]
    pub overlays: Vec<OverlayKind>,
}

#[derive(Debug, Clone, Args)]
pub struct DescribeArgs {
    /// Input document (JSON: timeline, lapGroups, metrics)
    pub input: PathBuf,

    /// Chart slot index to describe
    #[arg(short, long)]
    pub slot: usize,

    #[command(flatten)]
    pub metrics: MetricArgs,
}

/// Read the input document and apply metric overrides.
///
/// When neither the document nor the flags give a best lap, it is derived
/// from the timeline.
pub fn prepare_input(path: &Path, overrides: &MetricArgs) -> Result<AnalyticsInput, CliError> {
    if !path.exists() {
        return Err(CliError::InputNotFound(path.to_path_buf()));
    }
    let mut input = load_input(path).map_err(|err| match err {
        AnalyticsError::Io { source, .. } => CliError::IoError(source),
        other => CliError::Analytics(other),
    })?;

    if let Some(best) = overrides.best_lap {
        if !best.is_finite() || best <= 0.0 {
            return Err(CliError::ValidationError(format!(
                "--best-lap must be a positive number of seconds, got {best}"
            )));
        }
        input.metrics.best_lap_time_seconds = Some(best);
    }
    if let Some(lap_window) = overrides.window {
        input.metrics.fastest_consecutive = Some(FastestConsecutive {
            lap_window,
            total_seconds: None,
        });
    }
    if input.metrics.best_lap_time_seconds.is_none() {
        let derived = MetricSummary::derive(&input.timeline, 0);
        input.metrics.best_lap_time_seconds = derived.best_lap_time_seconds;
    }

    info!(
        path = %path.display(),
        laps = input.timeline.len(),
        races = input.lap_groups.len(),
        window = input.metrics.consecutive_window(),
        "prepared input"
    );
    Ok(input)
}
