//! Value-axis domain for the lap chart.

use serde::Serialize;

use crate::model::{LapPoint, OverlayPoint};
use crate::overlays::{OverlaySelection, OverlaySeries};

/// Default headroom above the largest value, as a fraction of the span.
pub const DEFAULT_PADDING_FRACTION: f64 = 0.1;

/// Vertical extent of the chart in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    /// Lower bound; always zero so bar heights stay comparable.
    pub min: f64,
    /// Upper bound including padding.
    pub max: f64,
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Compute the value domain over lap durations and the selected overlays.
///
/// Non-finite values are ignored. The maximum is padded by
/// `padding_fraction` of the value span; when every value is equal the
/// padding is that fraction of the maximum itself, or `1.0` if that is zero.
pub fn value_domain(
    points: &[LapPoint],
    overlays: &OverlaySeries,
    selection: OverlaySelection,
    padding_fraction: f64,
) -> ValueDomain {
    let values = points
        .iter()
        .map(|point| point.lap_time)
        .chain(selected(selection.best_lap, &overlays.best_lap))
        .chain(selected(selection.consecutive, &overlays.consecutive))
        .chain(selected(selection.race_total, &overlays.race_total))
        .filter(|value| value.is_finite());

    let Some((min, max)) = values.fold(None, |acc: Option<(f64, f64)>, value| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        })
    }) else {
        return ValueDomain::default();
    };

    let span = max - min;
    let padding = if span > 0.0 {
        span * padding_fraction
    } else {
        let scaled = max * padding_fraction;
        if scaled == 0.0 { 1.0 } else { scaled }
    };

    ValueDomain {
        min: 0.0,
        max: max + padding,
    }
}

fn selected(enabled: bool, series: &[OverlayPoint]) -> impl Iterator<Item = f64> + '_ {
    series
        .iter()
        .filter(move |_| enabled)
        .filter_map(|point| point.value)
}
