//! Human-readable description of a single chart slot.
//!
//! Produces the text a host shows when the pilot points at a bar: race, lap
//! number, duration, delta to the best lap, when the lap happened (with an
//! optional playback link supplied by the host) and any records set there.

use std::fmt::Write as _;

use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};
use serde::Serialize;

use crate::chart::ChartStructure;
use crate::model::Lap;
use crate::new_best::{BestKind, NewBestIndices};

/// Text used when a lap has no usable timestamp.
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Placeholder for an unknown delta.
pub const UNKNOWN_DELTA: &str = "—";

/// A link into a recording of the session, resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackLink {
    /// Target URL.
    pub href: String,
    /// Name of the recording.
    pub label: String,
    /// Whole seconds from the start of the recording.
    pub offset_seconds: u64,
}

impl PlaybackLink {
    /// Link text, e.g. `Watch Stream A (+42s)`.
    pub fn text(&self) -> String {
        if self.offset_seconds > 0 {
            format!("Watch {} (+{}s)", self.label, self.offset_seconds)
        } else {
            format!("Watch {}", self.label)
        }
    }
}

/// Maps a lap timestamp (epoch milliseconds) to a playback link.
pub trait PlaybackLinkResolver {
    /// Link for `timestamp_ms`, or `None` when no recording covers it.
    fn resolve(&self, timestamp_ms: Option<i64>) -> Option<PlaybackLink>;
}

impl<F> PlaybackLinkResolver for F
where
    F: Fn(Option<i64>) -> Option<PlaybackLink>,
{
    fn resolve(&self, timestamp_ms: Option<i64>) -> Option<PlaybackLink> {
        self(timestamp_ms)
    }
}

/// Resolver for hosts without recordings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayback;

impl PlaybackLinkResolver for NoPlayback {
    fn resolve(&self, _timestamp_ms: Option<i64>) -> Option<PlaybackLink> {
        None
    }
}

/// Format a duration as `12.345s`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.3}s")
}

/// Format a delta to the best lap: `+0.250s`, `−0.250s`, `0.000s`, or `—`.
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) if d.is_nan() => UNKNOWN_DELTA.to_string(),
        Some(d) if d > 0.0 => format!("+{d:.3}s"),
        Some(d) if d < 0.0 => format!("\u{2212}{:.3}s", d.abs()),
        Some(_) => format!("{:.3}s", 0.0),
        None => UNKNOWN_DELTA.to_string(),
    }
}

/// True when `format` is a strftime pattern chrono can render.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render epoch milliseconds in UTC with `format`, or [`UNKNOWN_TIME`].
pub fn format_timestamp(timestamp_ms: Option<i64>, format: &str) -> String {
    let Some(time) = timestamp_ms.and_then(DateTime::from_timestamp_millis) else {
        return UNKNOWN_TIME.to_string();
    };
    let mut rendered = String::new();
    match write!(rendered, "{}", time.format(format)) {
        Ok(()) => rendered,
        Err(_) => UNKNOWN_TIME.to_string(),
    }
}

/// Everything shown for one lap slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescription {
    /// Slot index described.
    pub index: usize,
    /// Race label.
    pub race_label: String,
    /// Lap number within the race.
    pub lap_number: u32,
    /// Formatted lap time.
    pub lap_time: String,
    /// Formatted delta to the best lap.
    pub delta_best: String,
    /// Formatted lap timestamp.
    pub time: String,
    /// Recording covering the lap, if the host knows one.
    pub playback: Option<PlaybackLink>,
    /// Records set at this slot, in precedence order.
    pub new_bests: Vec<BestKind>,
}

impl SlotDescription {
    /// The description as display lines.
    pub fn lines(&self) -> Vec<String> {
        let time_line = match &self.playback {
            Some(link) => format!("{} — {} <{}>", self.time, link.text(), link.href),
            None => self.time.clone(),
        };
        let mut lines = vec![
            self.race_label.clone(),
            format!("Lap {}", self.lap_number),
            self.lap_time.clone(),
            format!("Δ best: {}", self.delta_best),
            time_line,
        ];
        lines.extend(
            self.new_bests
                .iter()
                .map(|kind| kind.status_message().to_string()),
        );
        lines
    }
}

/// Describe the slot at `index`.
///
/// The lap timestamp is the source lap's start time, else its detection time,
/// looked up in `timeline` by lap id. Gap slots and out-of-range indices
/// return `None`.
pub fn describe_slot<R>(
    structure: &ChartStructure,
    timeline: &[Lap],
    new_best: &NewBestIndices,
    index: usize,
    resolver: &R,
    timestamp_format: &str,
) -> Option<SlotDescription>
where
    R: PlaybackLinkResolver + ?Sized,
{
    let lap = structure.slot(index)?.as_lap()?;
    let point = &lap.point;
    let timestamp_ms = timeline
        .iter()
        .find(|source| source.id == point.id)
        .and_then(Lap::display_timestamp_ms);

    Some(SlotDescription {
        index,
        race_label: point.race_label.clone(),
        lap_number: point.lap_number,
        lap_time: format_seconds(point.lap_time),
        delta_best: format_delta(point.delta_best),
        time: format_timestamp(timestamp_ms, timestamp_format),
        playback: resolver.resolve(timestamp_ms),
        new_bests: new_best.kinds_at(index),
    })
}
