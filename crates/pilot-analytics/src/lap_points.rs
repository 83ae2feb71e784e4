//! Lap point construction.
//!
//! Joins the flat chronological timeline with the per-race groups into
//! [`LapPoint`]s carrying a race-aware display order, elapsed time since the
//! first known lap start, and delta against the pilot's best lap.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{Lap, LapPoint, RaceLapGroup};

/// Per-race display offsets and labels, keyed by race id.
///
/// Offsets increase by one per race in group appearance order so that a new
/// race always sorts after the previous one even when lap indices restart.
#[derive(Debug, Clone, Default)]
pub(crate) struct RaceOffsets<'a> {
    offsets: HashMap<&'a str, u32>,
    labels: HashMap<&'a str, &'a str>,
}

impl<'a> RaceOffsets<'a> {
    /// Assign offsets to `groups` in the order they appear.
    pub fn from_groups(groups: &'a [RaceLapGroup]) -> Self {
        let mut offsets = HashMap::with_capacity(groups.len());
        let mut labels = HashMap::with_capacity(groups.len());
        for (offset, group) in (0u32..).zip(groups) {
            offsets.insert(group.race.id.as_str(), offset);
            labels.insert(group.race.id.as_str(), group.race.label.as_str());
        }
        Self { offsets, labels }
    }

    /// Offset for `race_id`, if the race is known.
    pub fn offset(&self, race_id: &str) -> Option<u32> {
        self.offsets.get(race_id).copied()
    }

    /// Group label for `race_id`, if the race is known.
    pub fn label(&self, race_id: &str) -> Option<&'a str> {
        self.labels.get(race_id).copied()
    }
}

/// Build one [`LapPoint`] per timeline lap, preserving timeline order.
///
/// - time zero is the first lap (in timeline order) with a start timestamp;
/// - `order = overall_index + 1 + race_offset`;
/// - `elapsed = (start - zero) / 1000` when both timestamps are known;
/// - `delta_best = length - best` when the best lap is known.
///
/// A lap whose race id is missing from `groups` still yields a point, using
/// offset `0`.
pub fn build_lap_points(
    timeline: &[Lap],
    groups: &[RaceLapGroup],
    best_lap_time_seconds: Option<f64>,
) -> Vec<LapPoint> {
    if timeline.is_empty() {
        return Vec::new();
    }

    let zero_ms = timeline.iter().find_map(|lap| lap.start_timestamp_ms);
    let races = RaceOffsets::from_groups(groups);

    let points: Vec<LapPoint> = timeline
        .iter()
        .map(|lap| {
            let offset = races.offset(&lap.race_id).unwrap_or_else(|| {
                warn!(
                    lap_id = %lap.id,
                    race_id = %lap.race_id,
                    "lap references a race with no lap group, using offset 0"
                );
                0
            });
            lap_point(lap, offset, zero_ms, best_lap_time_seconds, &races)
        })
        .collect();

    debug!(
        laps = points.len(),
        races = groups.len(),
        has_time_zero = zero_ms.is_some(),
        "built lap points"
    );
    points
}

fn lap_point(
    lap: &Lap,
    offset: u32,
    zero_ms: Option<i64>,
    best_lap_time_seconds: Option<f64>,
    races: &RaceOffsets<'_>,
) -> LapPoint {
    let order = f64::from(lap.overall_index) + 1.0 + f64::from(offset);
    let elapsed_seconds = match (lap.start_timestamp_ms, zero_ms) {
        (Some(start), Some(zero)) => Some(millis_to_seconds(start.saturating_sub(zero))),
        _ => None,
    };
    let race_label = lap
        .race_label
        .clone()
        .or_else(|| races.label(&lap.race_id).map(str::to_string))
        .unwrap_or_else(|| lap.race_id.clone());

    LapPoint {
        id: lap.id.clone(),
        order,
        elapsed_seconds,
        lap_time: lap.length_seconds,
        race_id: lap.race_id.clone(),
        race_label,
        lap_number: lap.lap_number,
        delta_best: best_lap_time_seconds.map(|best| lap.length_seconds - best),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans within a race day are far below 2^52"
)]
fn millis_to_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}
