//! Race color assignment.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::RaceLapGroup;

/// Bar colors cycled across races in appearance order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#9ba3ff", "#9bd2ff", "#ffade2", "#beffc9", "#ffd6a5", "#a5d6ff", "#ffb3ba", "#baffc9",
];

/// Color used for laps whose race has no assigned color.
pub const FALLBACK_COLOR: &str = "#ffffff";

/// One race's assigned color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceColor {
    /// Race identifier.
    pub race_id: String,
    /// `#rrggbb` color.
    pub color: String,
}

/// Race id to color, in race appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RaceColors {
    entries: Vec<RaceColor>,
    #[serde(skip)]
    by_race: HashMap<String, usize>,
}

impl RaceColors {
    /// Assign `palette` colors to `groups` in order, cycling as needed.
    ///
    /// A race id listed twice keeps its first color. An empty palette
    /// assigns nothing.
    pub fn assign<S: AsRef<str>>(groups: &[RaceLapGroup], palette: &[S]) -> Self {
        let mut colors = Self::default();
        for (group, color) in groups.iter().zip(palette.iter().cycle()) {
            let race_id = group.race.id.as_str();
            if colors.by_race.contains_key(race_id) {
                continue;
            }
            colors.by_race.insert(race_id.to_string(), colors.entries.len());
            colors.entries.push(RaceColor {
                race_id: race_id.to_string(),
                color: color.as_ref().to_string(),
            });
        }
        colors
    }

    /// Color assigned to `race_id`, if any.
    pub fn get(&self, race_id: &str) -> Option<&str> {
        self.by_race
            .get(race_id)
            .and_then(|&i| self.entries.get(i))
            .map(|entry| entry.color.as_str())
    }

    /// Color for `race_id`, or [`FALLBACK_COLOR`].
    pub fn color_or_fallback(&self, race_id: &str) -> &str {
        self.get(race_id).unwrap_or(FALLBACK_COLOR)
    }

    /// Assignments in race appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, RaceColor> {
        self.entries.iter()
    }

    /// Number of colored races.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no race has a color.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RaceInfo;

    fn groups(ids: &[&str]) -> Vec<RaceLapGroup> {
        ids.iter()
            .map(|id| RaceLapGroup {
                race: RaceInfo {
                    id: (*id).to_string(),
                    label: (*id).to_string(),
                    order: 0,
                    target_laps: None,
                },
                holeshot: None,
                laps: Vec::new(),
                channel: None,
            })
            .collect()
    }

    #[test]
    fn test_colors_follow_group_order() {
        let colors = RaceColors::assign(&groups(&["a", "b"]), &DEFAULT_PALETTE);
        assert_eq!(colors.get("a"), Some("#9ba3ff"));
        assert_eq!(colors.get("b"), Some("#9bd2ff"));
        let ids: Vec<&str> = colors.iter().map(|c| c.race_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_palette_cycles() {
        let colors = RaceColors::assign(&groups(&["a", "b", "c"]), &["#000000", "#111111"]);
        assert_eq!(colors.get("c"), Some("#000000"));
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_unknown_race_falls_back() {
        let colors = RaceColors::assign(&groups(&["a"]), &DEFAULT_PALETTE);
        assert_eq!(colors.color_or_fallback("zzz"), FALLBACK_COLOR);
    }

    #[test]
    fn test_empty_palette_assigns_nothing() {
        let empty: [&str; 0] = [];
        let colors = RaceColors::assign(&groups(&["a"]), &empty);
        assert!(colors.is_empty());
        assert_eq!(colors.color_or_fallback("a"), FALLBACK_COLOR);
    }

    #[test]
    fn test_duplicate_race_keeps_first_color() {
        let colors = RaceColors::assign(&groups(&["a", "a", "b"]), &DEFAULT_PALETTE);
        assert_eq!(colors.get("a"), Some("#9ba3ff"));
        assert_eq!(colors.get("b"), Some("#ffade2"));
        assert_eq!(colors.len(), 2);
    }
}
