//! Running best single lap.

use crate::model::{LapPoint, OverlayPoint};
use crate::running_min::running_min_series;

/// Running minimum of lap durations, one value per lap point.
///
/// Non-increasing wherever defined; `None` only until the first finite
/// duration is seen.
pub fn running_best_lap(points: &[LapPoint]) -> Vec<OverlayPoint> {
    let best = running_min_series(points, |point| Some(point.lap_time));
    points
        .iter()
        .zip(best)
        .map(|(point, value)| OverlayPoint::at(point, value))
        .collect()
}
