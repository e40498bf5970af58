//! Filtering and ranking of generated combinations.
//!
//! Filters are thresholds on [`ScheduleMetrics`](crate::models::ScheduleMetrics)
//! combined with AND; ordering is a single metric with a direction.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ranking::{filter_combinations, preset, FilterOptions};
//!
//! let options = preset("max_free_days").map(|p| p.filters).unwrap_or_default();
//! let ranked = filter_combinations(Vec::new(), &options.with_max_gaps(2));
//! assert!(ranked.is_empty());
//! ```
//!
//! # Ordering
//!
//! The sort is stable, so ties keep enumeration order. `gapsCount` and
//! `gapsMinutes` always rank fewer gaps first, whatever the requested order.

mod filter;
mod presets;

pub use filter::{filter_combinations, FilterOptions, SortKey, SortOrder};
pub use presets::{preset, presets, Preset};
