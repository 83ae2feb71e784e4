//! Convenience re-exports for hosts driving the pipeline.
//!
//! ```
//! use pilot_analytics::prelude::*;
//!
//! let result = analyze(&AnalyticsInput::default());
//! assert!(result.is_empty());
//! ```

pub use crate::chart::{ChartSlot, ChartStructure, RaceIndexRanges};
pub use crate::config::AnalyticsConfig;
pub use crate::describe::{PlaybackLink, PlaybackLinkResolver, SlotDescription};
pub use crate::domain::ValueDomain;
pub use crate::error::{AnalyticsError, Result};
pub use crate::model::{AnalyticsInput, Lap, LapPoint, MetricSummary, RaceInfo, RaceLapGroup};
pub use crate::new_best::{BestKind, MarkerLine, NewBestIndices};
pub use crate::overlays::{OverlaySelection, OverlaySeries};
pub use crate::pipeline::{PilotAnalytics, analyze, analyze_with, load_input};
