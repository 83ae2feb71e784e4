//! Running best race completion time.
//!
//! A race is complete once the pilot has at least `target_laps` timed laps.
//! Its completion time is the holeshot plus the first `target_laps` timed
//! laps, attributed to the lap that reached the target.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{LapPoint, OverlayPoint, RaceLapGroup};
use crate::running_min::running_min_series;

/// Completion time per completion lap id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionTimes {
    by_lap: HashMap<String, f64>,
}

impl CompletionTimes {
    /// Collect completion times for every race that reached its target.
    ///
    /// Races without a positive target, without a holeshot, or with fewer
    /// timed laps than the target contribute nothing.
    pub fn from_groups(groups: &[RaceLapGroup]) -> Self {
        let mut by_lap = HashMap::new();

        for group in groups {
            let Some((lap_id, total)) = completion(group) else {
                continue;
            };
            if !total.is_finite() {
                warn!(
                    race_id = %group.race.id,
                    "race completion time is not finite, skipping"
                );
                continue;
            }
            by_lap.insert(lap_id.to_string(), total);
        }

        debug!(
            races = groups.len(),
            completed = by_lap.len(),
            "collected race completion times"
        );
        Self { by_lap }
    }

    /// Completion time attributed to `lap_id`, if it completed a race.
    pub fn get(&self, lap_id: &str) -> Option<f64> {
        self.by_lap.get(lap_id).copied()
    }

    /// Number of completed races.
    pub fn len(&self) -> usize {
        self.by_lap.len()
    }

    /// True when no race reached its target.
    pub fn is_empty(&self) -> bool {
        self.by_lap.is_empty()
    }
}

fn completion(group: &RaceLapGroup) -> Option<(&str, f64)> {
    let target = usize::try_from(group.race.target_laps?).ok()?;
    if target == 0 {
        return None;
    }
    let holeshot = group.holeshot.as_ref()?;
    let completion_lap = group.laps.get(target.checked_sub(1)?)?;
    let timed: f64 = group
        .laps
        .iter()
        .take(target)
        .map(|lap| lap.length_seconds)
        .sum();
    Some((completion_lap.id.as_str(), holeshot.length_seconds + timed))
}

/// Running best race completion time, one value per lap point.
///
/// The minimum only moves at completion laps and is carried forward
/// everywhere else; values are `None` until the first completion.
pub fn running_best_race_total(points: &[LapPoint], groups: &[RaceLapGroup]) -> Vec<OverlayPoint> {
    let completions = CompletionTimes::from_groups(groups);
    let best = running_min_series(points, |point| completions.get(&point.id));
    points
        .iter()
        .zip(best)
        .map(|(point, value)| OverlayPoint::at(point, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lap, RaceInfo};

    fn lap(id: &str, race: &str, lap_number: u32, length: f64) -> Lap {
        Lap {
            id: id.to_string(),
            race_id: race.to_string(),
            race_label: None,
            overall_index: 0,
            lap_number,
            length_seconds: length,
            start_timestamp_ms: None,
            detection_timestamp_ms: None,
        }
    }

    fn group(race: &str, target: Option<u32>, holeshot: Option<f64>, laps: &[f64]) -> RaceLapGroup {
        RaceLapGroup {
            race: RaceInfo {
                id: race.to_string(),
                label: race.to_uppercase(),
                order: 0,
                target_laps: target,
            },
            holeshot: holeshot.map(|len| lap(&format!("{race}-h"), race, 0, len)),
            laps: (1u32..)
                .zip(laps)
                .map(|(n, &len)| lap(&format!("{race}-{n}"), race, n, len))
                .collect(),
            channel: None,
        }
    }

    fn points_for(groups: &[RaceLapGroup]) -> Vec<LapPoint> {
        let mut order = 0.0;
        let mut points = Vec::new();
        for g in groups {
            for l in g.holeshot.iter().chain(&g.laps) {
                order += 1.0;
                points.push(LapPoint {
                    id: l.id.clone(),
                    order,
                    elapsed_seconds: None,
                    lap_time: l.length_seconds,
                    race_id: g.race.id.clone(),
                    race_label: g.race.label.clone(),
                    lap_number: l.lap_number,
                    delta_best: None,
                });
            }
        }
        points
    }

    #[test]
    fn test_completion_time_includes_holeshot() {
        let groups = vec![group("r1", Some(2), Some(5.0), &[20.0, 19.0])];
        let completions = CompletionTimes::from_groups(&groups);
        assert_eq!(completions.len(), 1);
        assert!(completions.get("r1-2").is_some_and(|t| (t - 44.0).abs() < 1e-9));
        assert!(completions.get("r1-1").is_none());
    }

    #[test]
    fn test_incomplete_race_contributes_nothing() {
        let groups = vec![group("r1", Some(2), Some(5.0), &[20.0])];
        assert!(CompletionTimes::from_groups(&groups).is_empty());
    }

    #[test]
    fn test_missing_target_or_holeshot_contributes_nothing() {
        let groups = vec![
            group("r1", None, Some(5.0), &[20.0, 19.0]),
            group("r2", Some(0), Some(5.0), &[20.0, 19.0]),
            group("r3", Some(2), None, &[20.0, 19.0]),
        ];
        assert!(CompletionTimes::from_groups(&groups).is_empty());
    }

    #[test]
    fn test_only_first_target_laps_count() {
        let groups = vec![group("r1", Some(2), Some(5.0), &[20.0, 19.0, 1.0])];
        let completions = CompletionTimes::from_groups(&groups);
        assert!(completions.get("r1-2").is_some_and(|t| (t - 44.0).abs() < 1e-9));
    }

    #[test]
    fn test_series_carries_best_completion_forward() {
        let groups = vec![
            group("r1", Some(2), Some(5.0), &[20.0, 19.0, 21.0]),
            group("r2", Some(2), Some(4.0), &[22.0, 23.0]),
            group("r3", Some(2), Some(4.0), &[18.0, 18.0]),
        ];
        let points = points_for(&groups);
        let values: Vec<Option<f64>> = running_best_race_total(&points, &groups)
            .iter()
            .map(|p| p.value)
            .collect();

        // r1: h,1,2,3  r2: h,1,2  r3: h,1,2
        let expected = [
            None,
            None,
            Some(44.0),
            Some(44.0),
            Some(44.0),
            Some(44.0),
            Some(44.0), // r2 completes at 49.0, no improvement
            Some(44.0),
            Some(44.0),
            Some(40.0),
        ];
        assert_eq!(values.len(), expected.len());
        for (got, want) in values.iter().zip(expected) {
            match want {
                Some(w) => assert!(got.is_some_and(|g| (g - w).abs() < 1e-9), "{got:?} != {w}"),
                None => assert!(got.is_none()),
            }
        }
    }

    #[test]
    fn test_non_finite_completion_is_skipped() {
        let groups = vec![group("r1", Some(1), Some(f64::NAN), &[20.0])];
        assert!(CompletionTimes::from_groups(&groups).is_empty());
    }
}
