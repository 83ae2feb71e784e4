//! Running-best overlays aligned one-to-one with lap points.
//!
//! - [`best_lap`]: running minimum of single lap durations
//! - [`consecutive`]: running minimum of fixed-size sliding-window sums
//! - [`race_total`]: running minimum of race completion times
//!
//! The three are independent of each other; each only reads the lap points
//! (and, for race totals, the race groups).

pub mod best_lap;
pub mod consecutive;
pub mod race_total;

use serde::Serialize;

use crate::model::{LapPoint, OverlayPoint, RaceLapGroup};

pub use best_lap::running_best_lap;
pub use consecutive::{ConsecutiveWindow, running_best_consecutive};
pub use race_total::{CompletionTimes, running_best_race_total};

/// The three overlay series, each the same length as the lap points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySeries {
    /// Running best single lap.
    pub best_lap: Vec<OverlayPoint>,
    /// Running best sum of consecutive laps.
    pub consecutive: Vec<OverlayPoint>,
    /// Running best race completion time.
    pub race_total: Vec<OverlayPoint>,
}

impl OverlaySeries {
    /// Compute all three overlays for `points`.
    pub fn compute(points: &[LapPoint], groups: &[RaceLapGroup], consecutive_window: usize) -> Self {
        Self {
            best_lap: running_best_lap(points),
            consecutive: running_best_consecutive(points, consecutive_window),
            race_total: running_best_race_total(points, groups),
        }
    }

    /// Number of aligned entries (equal to the lap point count).
    pub fn len(&self) -> usize {
        self.best_lap.len()
    }

    /// True when there are no lap points.
    pub fn is_empty(&self) -> bool {
        self.best_lap.is_empty()
    }

    /// Overlay values at lap point `index`, if in range.
    pub fn values_at(&self, index: usize) -> Option<SlotOverlays> {
        let value = |series: &[OverlayPoint]| series.get(index).and_then(|p| p.value);
        (index < self.len()).then(|| SlotOverlays {
            best_lap: value(&self.best_lap),
            consecutive: value(&self.consecutive),
            race_total: value(&self.race_total),
        })
    }
}

/// Overlay values carried by a single chart slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOverlays {
    /// Running best lap at this slot.
    pub best_lap: Option<f64>,
    /// Running best consecutive window at this slot.
    pub consecutive: Option<f64>,
    /// Running best race total at this slot.
    pub race_total: Option<f64>,
}

/// Which overlays the host has chosen to display.
///
/// This is host state, passed in where it matters (e.g. the value domain);
/// overlays are always computed in full regardless of visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySelection {
    /// Show the running best lap line.
    pub best_lap: bool,
    /// Show the running best consecutive line.
    pub consecutive: bool,
    /// Show the running best race total line.
    pub race_total: bool,
}

impl OverlaySelection {
    /// Every overlay visible.
    pub const ALL: Self = Self {
        best_lap: true,
        consecutive: true,
        race_total: true,
    };

    /// No overlay visible (bars only).
    pub const NONE: Self = Self {
        best_lap: false,
        consecutive: false,
        race_total: false,
    };
}
