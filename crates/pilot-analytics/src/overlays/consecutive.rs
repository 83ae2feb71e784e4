//! Running best sum of consecutive laps.
//!
//! A bounded FIFO of the most recent `W` lap durations; once full, each new
//! lap yields a window sum that is folded into a running minimum. The value
//! at lap `i` is therefore the best `W`-lap stretch ending at or before `i`.

use std::collections::VecDeque;

use tracing::trace;

use crate::model::{LapPoint, OverlayPoint};
use crate::running_min::running_min_series;

/// Bounded sliding window over lap durations.
///
/// Storage grows with the laps pushed, not with `size`.
#[derive(Debug, Clone)]
pub struct ConsecutiveWindow {
    size: usize,
    laps: VecDeque<f64>,
}

impl ConsecutiveWindow {
    /// Create a window summing `size` consecutive laps.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            laps: VecDeque::new(),
        }
    }

    /// Window size; sizes `0` and `1` disable the overlay.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the window is too small to be meaningful.
    pub fn is_disabled(&self) -> bool {
        self.size <= 1
    }

    /// Append a lap, evicting the oldest once over capacity.
    ///
    /// Returns the window sum once exactly `size` laps are buffered.
    pub fn push(&mut self, lap_time: f64) -> Option<f64> {
        self.laps.push_back(lap_time);
        if self.laps.len() > self.size {
            self.laps.pop_front();
        }
        (self.laps.len() == self.size).then(|| self.laps.iter().sum())
    }
}

/// Running best `window`-lap sum, one value per lap point.
///
/// With `window <= 1` every value is `None`, as is every value when the
/// window never fills. Otherwise the first `window - 1` values are `None` and
/// each later value is the minimum of all complete window sums so far.
pub fn running_best_consecutive(points: &[LapPoint], window: usize) -> Vec<OverlayPoint> {
    let mut buffer = ConsecutiveWindow::new(window);
    if buffer.is_disabled() || window > points.len() {
        trace!(window, laps = points.len(), "consecutive overlay has no complete window");
        return points.iter().map(|p| OverlayPoint::at(p, None)).collect();
    }

    let best = running_min_series(points, |point| buffer.push(point.lap_time));
    points
        .iter()
        .zip(best)
        .map(|(point, value)| OverlayPoint::at(point, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(times: &[f64]) -> Vec<LapPoint> {
        (0u32..)
            .zip(times)
            .map(|(i, &lap_time)| LapPoint {
                id: format!("lap-{i}"),
                order: f64::from(i) + 1.0,
                elapsed_seconds: None,
                lap_time,
                race_id: "r1".to_string(),
                race_label: "Heat 1".to_string(),
                lap_number: i,
                delta_best: None,
            })
            .collect()
    }

    fn values(times: &[f64], window: usize) -> Vec<Option<f64>> {
        running_best_consecutive(&points(times), window)
            .iter()
            .map(|p| p.value)
            .collect()
    }

    fn assert_series(got: &[Option<f64>], want: &[Option<f64>]) {
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            match (g, w) {
                (Some(g), Some(w)) => assert!((g - w).abs() < 1e-9, "got {g}, want {w}"),
                _ => assert!(g.is_none() && w.is_none(), "got {g:?}, want {w:?}"),
            }
        }
    }

    #[test]
    fn test_window_of_three() {
        // windows: [10,9,8]=27, [9,8,20]=37, [8,20,7]=35
        let got = values(&[10.0, 9.0, 8.0, 20.0, 7.0], 3);
        assert_series(&got, &[None, None, Some(27.0), Some(27.0), Some(27.0)]);
    }

    #[test]
    fn test_window_improves_when_sum_drops() {
        // windows: 40, 39, 30
        let got = values(&[20.0, 20.0, 19.0, 11.0], 2);
        assert_series(&got, &[None, Some(40.0), Some(39.0), Some(30.0)]);
    }

    #[test]
    fn test_disabled_windows_emit_nothing() {
        for window in [0, 1] {
            let got = values(&[10.0, 9.0, 8.0], window);
            assert_series(&got, &[None, None, None]);
        }
    }

    #[test]
    fn test_window_larger_than_history() {
        let got = values(&[10.0, 9.0], 5);
        assert_series(&got, &[None, None]);
    }

    #[test]
    fn test_huge_window_never_fills() {
        assert_series(&values(&[10.0, 9.0], usize::MAX), &[None, None]);
        assert_series(&values(&[10.0], 1 << 40), &[None]);
        assert!(values(&[], usize::MAX).is_empty());
    }

    #[test]
    fn test_huge_window_buffer_stays_small() {
        let mut window = ConsecutiveWindow::new(usize::MAX);
        assert!(!window.is_disabled());
        for lap_time in [10.0, 9.0, 8.0] {
            assert!(window.push(lap_time).is_none());
        }
    }

    #[test]
    fn test_non_finite_lap_poisons_only_its_windows() {
        // windows: NaN, NaN, 17
        let got = values(&[f64::NAN, 9.0, 8.0, 9.0], 2);
        assert_series(&got, &[None, None, Some(17.0), Some(17.0)]);
    }

    #[test]
    fn test_consecutive_window_buffer() {
        let mut window = ConsecutiveWindow::new(2);
        assert_eq!(window.size(), 2);
        assert!(!window.is_disabled());
        assert!(window.push(1.0).is_none());
        assert!(window.push(2.0).is_some_and(|s| (s - 3.0).abs() < 1e-9));
        assert!(window.push(4.0).is_some_and(|s| (s - 6.0).abs() < 1e-9));
    }
}
