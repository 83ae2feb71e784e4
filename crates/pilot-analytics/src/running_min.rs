//! Finiteness-guarded running minimum.
//!
//! Every running-best metric in this crate (best lap, best consecutive
//! window, best race total, and the new-best replay) is the same fold:
//! seeded at positive infinity, updated with `min`, ignoring values that are
//! not finite. [`RunningMin`] is that fold; [`running_min_series`] applies it
//! over a slice with a caller-supplied extraction function.

/// Running minimum over a stream of `f64` observations.
///
/// Non-finite observations (`NaN`, `±inf`) are ignored, so a single corrupt
/// duration can never poison the minimum.
///
/// # Example
///
/// ```
/// use pilot_analytics::RunningMin;
///
/// let mut best = RunningMin::new();
/// assert_eq!(best.value(), None);
/// assert!(best.observe(12.0));
/// assert!(!best.observe(f64::NAN));
/// assert!(!best.observe(12.0)); // ties do not improve
/// assert!(best.observe(11.5));
/// assert_eq!(best.value(), Some(11.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningMin {
    best: f64,
}

impl RunningMin {
    /// Create an empty running minimum (seeded at `+inf`).
    pub const fn new() -> Self {
        Self {
            best: f64::INFINITY,
        }
    }

    /// Fold `value` into the minimum.
    ///
    /// Returns `true` only when `value` is finite and strictly less than the
    /// current minimum.
    pub fn observe(&mut self, value: f64) -> bool {
        if value.is_finite() && value < self.best {
            self.best = value;
            true
        } else {
            false
        }
    }

    /// Current minimum, or `None` while nothing finite has been observed.
    pub fn value(&self) -> Option<f64> {
        self.best.is_finite().then_some(self.best)
    }
}

impl Default for RunningMin {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the running minimum of `extract(item)` over `items`.
///
/// Items for which `extract` yields `None` carry the previous minimum
/// forward. The output has the same length as `items`; entries are `None`
/// until the first finite value is observed.
pub fn running_min_series<T, F>(items: &[T], mut extract: F) -> Vec<Option<f64>>
where
    F: FnMut(&T) -> Option<f64>,
{
    let mut best = RunningMin::new();
    items
        .iter()
        .map(|item| {
            if let Some(value) = extract(item) {
                best.observe(value);
            }
            best.value()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => (a - b).abs() < 1e-9,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_new_running_min_is_undefined() {
        let best = RunningMin::new();
        assert!(best.value().is_none());
        assert_eq!(best, RunningMin::default());
    }

    #[test]
    fn test_observe_reports_strict_improvement_only() {
        let mut best = RunningMin::new();
        assert!(best.observe(10.0));
        assert!(!best.observe(10.0));
        assert!(!best.observe(10.5));
        assert!(best.observe(9.75));
        assert!(approx_eq(best.value(), Some(9.75)));
    }

    #[test]
    fn test_observe_ignores_non_finite() {
        let mut best = RunningMin::new();
        assert!(!best.observe(f64::NAN));
        assert!(!best.observe(f64::NEG_INFINITY));
        assert!(!best.observe(f64::INFINITY));
        assert!(best.value().is_none());
    }

    #[test]
    fn test_series_carries_minimum_forward() {
        let values = [Some(12.0), None, Some(13.0), Some(11.0), None];
        let series = running_min_series(&values, |v| *v);
        let expected = [Some(12.0), Some(12.0), Some(12.0), Some(11.0), Some(11.0)];
        assert_eq!(series.len(), expected.len());
        for (got, want) in series.iter().zip(expected.iter()) {
            assert!(approx_eq(*got, *want), "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn test_series_is_none_until_first_value() {
        let values = [None, Some(f64::NAN), Some(5.0)];
        let series = running_min_series(&values, |v| *v);
        assert!(series.first().is_some_and(Option::is_none));
        assert!(series.get(1).is_some_and(Option::is_none));
        assert!(approx_eq(series.get(2).copied().flatten(), Some(5.0)));
    }

    #[test]
    fn test_series_on_empty_input() {
        let values: [Option<f64>; 0] = [];
        assert!(running_min_series(&values, |v| *v).is_empty());
    }
}
