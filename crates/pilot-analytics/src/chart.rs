//! Chart structure: lap slots laid out race by race with gap slots between.
//!
//! Lap points and their overlay values are merged into one ordered sequence
//! of [`ChartSlot`]s. Wherever the race changes between two consecutive lap
//! points a single [`ChartSlot::Gap`] is inserted, and each race's contiguous
//! slot range is recorded in [`RaceIndexRanges`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::LapPoint;
use crate::overlays::{OverlaySeries, SlotOverlays};

/// A slot holding a real lap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapSlot {
    /// Stable slot key (the lap id).
    pub key: String,
    /// The lap point shown in this slot.
    pub point: LapPoint,
    /// Bar height: the lap duration when finite.
    pub bar_value: Option<f64>,
    /// Overlay values aligned to this lap.
    pub overlays: SlotOverlays,
}

/// A deliberate empty slot separating two races.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapSlot {
    /// Stable slot key, `gap-{previous}-{next}-{index}`.
    pub key: String,
    /// Race before the gap.
    pub previous_race_id: String,
    /// Race after the gap.
    pub next_race_id: String,
}

/// One display position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartSlot {
    /// A lap with its overlay values.
    Lap(LapSlot),
    /// A race boundary; carries no lap and no overlay values.
    Gap(GapSlot),
}

impl ChartSlot {
    /// Stable key of this slot.
    pub fn key(&self) -> &str {
        match self {
            Self::Lap(slot) => &slot.key,
            Self::Gap(slot) => &slot.key,
        }
    }

    /// The lap slot, if this is not a gap.
    pub fn as_lap(&self) -> Option<&LapSlot> {
        match self {
            Self::Lap(slot) => Some(slot),
            Self::Gap(_) => None,
        }
    }

    /// True for boundary gap slots.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap(_))
    }

    /// Overlay values; all `None` for gaps.
    pub fn overlays(&self) -> SlotOverlays {
        self.as_lap().map(|slot| slot.overlays).unwrap_or_default()
    }
}

/// Inclusive slot range of one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRange {
    /// Race identifier.
    pub race_id: String,
    /// First slot index of the race.
    pub start: usize,
    /// Last slot index of the race.
    pub end: usize,
}

impl RaceRange {
    /// Number of slots spanned, inclusive.
    pub fn slot_count(&self) -> usize {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Middle slot, `floor((start + end) / 2)`.
    pub fn middle(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    /// True when `index` falls inside this range.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Race id to slot range, with explicit appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RaceIndexRanges {
    ranges: Vec<RaceRange>,
    #[serde(skip)]
    by_race: HashMap<String, usize>,
}

impl RaceIndexRanges {
    /// Range of `race_id`, if it has any slot.
    pub fn get(&self, race_id: &str) -> Option<&RaceRange> {
        self.by_race
            .get(race_id)
            .and_then(|&position| self.ranges.get(position))
    }

    /// Ranges in race appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, RaceRange> {
        self.ranges.iter()
    }

    /// Number of races.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True when there are no races.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Race owning slot `index`.
    pub fn race_at(&self, index: usize) -> Option<&RaceRange> {
        self.ranges.iter().find(|range| range.contains(index))
    }

    fn record(&mut self, race_id: &str, index: usize) {
        match self.by_race.get(race_id) {
            Some(&position) => {
                if let Some(range) = self.ranges.get_mut(position) {
                    range.end = index;
                }
            }
            None => {
                self.by_race.insert(race_id.to_string(), self.ranges.len());
                self.ranges.push(RaceRange {
                    race_id: race_id.to_string(),
                    start: index,
                    end: index,
                });
            }
        }
    }
}

impl<'a> IntoIterator for &'a RaceIndexRanges {
    type Item = &'a RaceRange;
    type IntoIter = std::slice::Iter<'a, RaceRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ordered slots plus per-race index ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStructure {
    /// Slots in display order.
    pub slots: Vec<ChartSlot>,
    /// Slot range of each race.
    pub race_index_ranges: RaceIndexRanges,
}

impl ChartStructure {
    /// Slot at `index`.
    pub fn slot(&self, index: usize) -> Option<&ChartSlot> {
        self.slots.get(index)
    }

    /// Number of slots, gaps included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of gap slots.
    pub fn gap_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_gap()).count()
    }

    /// Race label shown under slot `index`.
    ///
    /// Only the middle slot of each race carries its label; every other slot,
    /// and every gap, has none.
    pub fn axis_label(&self, index: usize) -> Option<&str> {
        let lap = self.slot(index)?.as_lap()?;
        let range = self.race_index_ranges.get(&lap.point.race_id)?;
        (range.middle() == index).then_some(lap.point.race_label.as_str())
    }
}

/// Merge lap points and overlays into a [`ChartStructure`].
///
/// `overlays` must be index-aligned with `points`; missing overlay entries
/// are treated as `None`.
pub fn build_chart_structure(points: &[LapPoint], overlays: &OverlaySeries) -> ChartStructure {
    let mut slots = Vec::with_capacity(points.len().saturating_mul(2));
    let mut ranges = RaceIndexRanges::default();
    let mut previous_race: Option<&str> = None;

    for (index, point) in points.iter().enumerate() {
        if let Some(previous) = previous_race.filter(|&prev| prev != point.race_id) {
            if ranges.get(&point.race_id).is_some() {
                warn!(
                    race_id = %point.race_id,
                    "race laps are not contiguous in the timeline"
                );
            }
            slots.push(ChartSlot::Gap(GapSlot {
                key: format!("gap-{previous}-{}-{index}", point.race_id),
                previous_race_id: previous.to_string(),
                next_race_id: point.race_id.clone(),
            }));
        }

        let slot_index = slots.len();
        slots.push(ChartSlot::Lap(LapSlot {
            key: point.id.clone(),
            point: point.clone(),
            bar_value: point.lap_time.is_finite().then_some(point.lap_time),
            overlays: overlays.values_at(index).unwrap_or_default(),
        }));
        ranges.record(&point.race_id, slot_index);

        previous_race = Some(point.race_id.as_str());
    }

    debug!(
        slots = slots.len(),
        races = ranges.len(),
        "built chart structure"
    );
    ChartStructure {
        slots,
        race_index_ranges: ranges,
    }
}
