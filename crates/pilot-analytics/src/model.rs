//! Input and output value types.
//!
//! Inputs mirror what the host assembles for one pilot: a flat chronological
//! lap timeline, the same laps grouped per race, and a metrics summary.
//! Outputs are immutable value records computed fresh on every run.

use serde::{Deserialize, Serialize};

/// A single timed lap as recorded for the pilot.
///
/// Lap number `0` is the holeshot (start lap): the time from the race start
/// to the first gate crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    /// Lap identifier, unique across the timeline.
    pub id: String,
    /// Identifier of the race this lap belongs to.
    pub race_id: String,
    /// Display label of the owning race, when the host has one at hand.
    #[serde(default)]
    pub race_label: Option<String>,
    /// Chronological position of the lap in the pilot's timeline.
    pub overall_index: u32,
    /// Lap number within the race (`0` = holeshot).
    pub lap_number: u32,
    /// Lap duration in seconds.
    pub length_seconds: f64,
    /// Epoch milliseconds at which the lap started.
    #[serde(default)]
    pub start_timestamp_ms: Option<i64>,
    /// Epoch milliseconds at which the lap was detected at the gate.
    #[serde(default)]
    pub detection_timestamp_ms: Option<i64>,
}

impl Lap {
    /// Timestamp used when describing the lap: start time, else detection time.
    pub fn display_timestamp_ms(&self) -> Option<i64> {
        self.start_timestamp_ms.or(self.detection_timestamp_ms)
    }

    /// Duration in seconds when it is a usable (finite) number.
    pub fn finite_length(&self) -> Option<f64> {
        self.length_seconds
            .is_finite()
            .then_some(self.length_seconds)
    }
}

/// Race metadata shared by every lap of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceInfo {
    /// Race identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Ordering index of the race within its event.
    #[serde(default)]
    pub order: i32,
    /// Number of timed laps required to complete the race.
    #[serde(default)]
    pub target_laps: Option<u32>,
}

/// Reference to the video/radio channel the pilot flew on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRef {
    /// Channel identifier.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// The pilot's laps in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceLapGroup {
    /// Race metadata.
    pub race: RaceInfo,
    /// The start lap, if one was detected.
    #[serde(default)]
    pub holeshot: Option<Lap>,
    /// Timed laps in lap order, holeshot excluded.
    #[serde(default)]
    pub laps: Vec<Lap>,
    /// Channel metadata.
    #[serde(default)]
    pub channel: Option<ChannelRef>,
}

/// The pilot's fastest stretch of consecutive laps, as summarized by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestConsecutive {
    /// Number of back-to-back laps in the window.
    pub lap_window: usize,
    /// Summed duration of the fastest window, when known.
    #[serde(default)]
    pub total_seconds: Option<f64>,
}

/// Pilot-level metrics supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    /// The pilot's overall best lap duration.
    #[serde(default)]
    pub best_lap_time_seconds: Option<f64>,
    /// Fastest consecutive window; absent disables the consecutive overlay.
    #[serde(default)]
    pub fastest_consecutive: Option<FastestConsecutive>,
}

impl MetricSummary {
    /// Window size for the consecutive overlay; `0` when disabled.
    pub fn consecutive_window(&self) -> usize {
        self.fastest_consecutive
            .as_ref()
            .map_or(0, |fc| fc.lap_window)
    }

    /// Derive a summary from the timeline when the host has none.
    ///
    /// The best lap is the smallest finite duration among timed laps;
    /// holeshots (lap number `0`) are not ranked.
    pub fn derive(timeline: &[Lap], consecutive_window: usize) -> Self {
        let best_lap_time_seconds = timeline
            .iter()
            .filter(|lap| lap.lap_number > 0)
            .filter_map(Lap::finite_length)
            .reduce(f64::min);

        let fastest_consecutive = (consecutive_window > 0).then_some(FastestConsecutive {
            lap_window: consecutive_window,
            total_seconds: None,
        });

        Self {
            best_lap_time_seconds,
            fastest_consecutive,
        }
    }
}

/// Everything the analytics pipeline is a pure function of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsInput {
    /// Chronological lap timeline, possibly spanning several races.
    #[serde(default)]
    pub timeline: Vec<Lap>,
    /// Per-race lap groups in race appearance order.
    #[serde(default)]
    pub lap_groups: Vec<RaceLapGroup>,
    /// Host-supplied metrics.
    #[serde(default)]
    pub metrics: MetricSummary,
}

/// A lap normalized for display on a single race-aware axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapPoint {
    /// Source lap identifier.
    pub id: String,
    /// Global display position; strictly increasing across the timeline.
    pub order: f64,
    /// Seconds since the first known lap start.
    pub elapsed_seconds: Option<f64>,
    /// Lap duration in seconds.
    pub lap_time: f64,
    /// Owning race identifier.
    pub race_id: String,
    /// Owning race label.
    pub race_label: String,
    /// Lap number within the race.
    pub lap_number: u32,
    /// Difference to the pilot's overall best lap.
    pub delta_best: Option<f64>,
}

/// One value of a running-best overlay, aligned to a lap point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPoint {
    /// Display order of the lap point this value belongs to.
    pub order: f64,
    /// Elapsed time of that lap point.
    pub elapsed_seconds: Option<f64>,
    /// Metric value; `None` until the metric is defined.
    pub value: Option<f64>,
}

impl OverlayPoint {
    /// Align a metric value to a lap point.
    pub fn at(point: &LapPoint, value: Option<f64>) -> Self {
        Self {
            order: point.order,
            elapsed_seconds: point.elapsed_seconds,
            value,
        }
    }
}
