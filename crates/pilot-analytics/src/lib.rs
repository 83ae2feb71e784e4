//! Lap analytics for a single pilot across many races.
//!
//! Given a pilot's chronological lap timeline and the same laps grouped per
//! race, this crate derives everything a lap chart needs:
//!
//! - **Lap points**: a race-aware display order that always advances between
//!   races, elapsed time since the first known lap start, and delta to the
//!   pilot's best lap
//! - **Running-best overlays**: best single lap, best window of consecutive
//!   laps, and best race completion time, each as a non-increasing series
//! - **Chart structure**: lap slots with a gap slot at every race boundary and
//!   the slot range of each race
//! - **New-best detection**: the slots at which each metric set a record
//!
//! Every stage is a pure function of its inputs. Missing or non-finite data
//! degrades to `None` rather than failing; only loading documents and
//! validating configuration return errors.
//!
//! # Example
//!
//! ```
//! use pilot_analytics::{AnalyticsInput, Lap, MetricSummary, analyze};
//!
//! let lap = |id: &str, index: u32, seconds: f64| Lap {
//!     id: id.to_string(),
//!     race_id: "heat-1".to_string(),
//!     race_label: Some("Heat 1".to_string()),
//!     overall_index: index,
//!     lap_number: index + 1,
//!     length_seconds: seconds,
//!     start_timestamp_ms: None,
//!     detection_timestamp_ms: None,
//! };
//! let timeline = vec![lap("a", 0, 12.0), lap("b", 1, 11.0), lap("c", 2, 11.0)];
//! let input = AnalyticsInput {
//!     metrics: MetricSummary::derive(&timeline, 0),
//!     timeline,
//!     lap_groups: Vec::new(),
//! };
//!
//! let result = analyze(&input);
//! assert_eq!(result.structure.len(), 3);
//! assert_eq!(result.new_best.best_lap.len(), 2);
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod chart;
pub mod config;
pub mod describe;
pub mod domain;
pub mod error;
pub mod lap_points;
pub mod model;
pub mod new_best;
pub mod overlays;
pub mod palette;
pub mod pipeline;
pub mod prelude;
pub mod running_min;

pub use chart::{ChartSlot, ChartStructure, GapSlot, LapSlot, RaceIndexRanges, RaceRange};
pub use config::AnalyticsConfig;
pub use describe::{NoPlayback, PlaybackLink, PlaybackLinkResolver, SlotDescription};
pub use domain::ValueDomain;
pub use error::{AnalyticsError, Result};
pub use model::{
    AnalyticsInput, ChannelRef, FastestConsecutive, Lap, LapPoint, MetricSummary, OverlayPoint,
    RaceInfo, RaceLapGroup,
};
pub use new_best::{BestKind, MarkerLine, NewBestIndices};
pub use overlays::{OverlaySelection, OverlaySeries, SlotOverlays};
pub use palette::RaceColors;
pub use pipeline::{PilotAnalytics, analyze, analyze_with, load_input};
pub use running_min::RunningMin;
