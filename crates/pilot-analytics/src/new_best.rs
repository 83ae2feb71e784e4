//! New-best detection over a chart structure.
//!
//! Replays the slots once with three independent running minima and records
//! the slot indices at which each metric strictly improved. The three flags
//! are independent facts; precedence only applies when a consumer needs a
//! single marker or outline per slot ([`NewBestIndices::marker_lines`],
//! [`NewBestIndices::highlight`]).

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::chart::ChartStructure;
use crate::running_min::RunningMin;

/// The three running-best metrics, in marker precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BestKind {
    /// Fastest single lap.
    Lap,
    /// Fastest run of consecutive laps.
    Consecutive,
    /// Fastest race completion.
    RaceTotal,
}

impl BestKind {
    /// All kinds, highest precedence first.
    pub const ALL: [Self; 3] = [Self::Lap, Self::Consecutive, Self::RaceTotal];

    /// Status text announcing a new record of this kind.
    pub fn status_message(self) -> &'static str {
        match self {
            Self::Lap => "New best lap!",
            Self::Consecutive => "New best consecutive!",
            Self::RaceTotal => "New best race total!",
        }
    }
}

impl fmt::Display for BestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lap => "best lap",
            Self::Consecutive => "best consecutive",
            Self::RaceTotal => "best race total",
        };
        f.write_str(name)
    }
}

/// A vertical marker at a slot where a record was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLine {
    /// Slot index.
    pub index: usize,
    /// Record kind the marker is drawn for.
    pub kind: BestKind,
}

/// Slot indices at which each metric set a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBestIndices {
    /// Slots where the lap duration beat every earlier lap.
    pub best_lap: BTreeSet<usize>,
    /// Slots where the consecutive overlay improved.
    pub consecutive: BTreeSet<usize>,
    /// Slots where the race total overlay improved.
    pub race_total: BTreeSet<usize>,
}

impl NewBestIndices {
    /// Index set for `kind`.
    pub fn indices(&self, kind: BestKind) -> &BTreeSet<usize> {
        match kind {
            BestKind::Lap => &self.best_lap,
            BestKind::Consecutive => &self.consecutive,
            BestKind::RaceTotal => &self.race_total,
        }
    }

    /// Every kind of record set at `index`, in precedence order.
    pub fn kinds_at(&self, index: usize) -> Vec<BestKind> {
        BestKind::ALL
            .into_iter()
            .filter(|&kind| self.indices(kind).contains(&index))
            .collect()
    }

    /// The single kind used to outline the slot at `index`.
    pub fn highlight(&self, index: usize) -> Option<BestKind> {
        BestKind::ALL
            .into_iter()
            .find(|&kind| self.indices(kind).contains(&index))
    }

    /// One marker per slot that set any record.
    ///
    /// Best-lap markers come first, then consecutive markers at slots without
    /// a best-lap marker, then race-total markers at slots with neither. Each
    /// group is in ascending slot order.
    pub fn marker_lines(&self) -> Vec<MarkerLine> {
        let mut marked = BTreeSet::new();
        let mut lines = Vec::new();
        for kind in BestKind::ALL {
            for &index in self.indices(kind) {
                if marked.insert(index) {
                    lines.push(MarkerLine { index, kind });
                }
            }
        }
        lines
    }

    /// True when no record was set anywhere.
    pub fn is_empty(&self) -> bool {
        self.best_lap.is_empty() && self.consecutive.is_empty() && self.race_total.is_empty()
    }
}

/// Replay `structure` and collect the slots where each metric improved.
///
/// Only lap slots with a bar value are considered. A slot may appear in more
/// than one set.
pub fn detect_new_bests(structure: &ChartStructure) -> NewBestIndices {
    let mut best_lap = RunningMin::new();
    let mut best_consecutive = RunningMin::new();
    let mut best_race_total = RunningMin::new();
    let mut found = NewBestIndices::default();

    for (index, slot) in structure.slots.iter().enumerate() {
        let Some(lap) = slot.as_lap().filter(|lap| lap.bar_value.is_some()) else {
            continue;
        };

        if best_lap.observe(lap.point.lap_time) {
            found.best_lap.insert(index);
        }
        if let Some(value) = lap.overlays.consecutive
            && best_consecutive.observe(value)
        {
            found.consecutive.insert(index);
        }
        if let Some(value) = lap.overlays.race_total
            && best_race_total.observe(value)
        {
            found.race_total.insert(index);
        }
    }

    debug!(
        best_lap = found.best_lap.len(),
        consecutive = found.consecutive.len(),
        race_total = found.race_total.len(),
        "detected new bests"
    );
    found
}
