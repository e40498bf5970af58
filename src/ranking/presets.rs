//! Named filter presets.
//!
//! | Id | Sort | Extra filter |
//! |----|------|--------------|
//! | `max_free_days` | free days, desc | |
//! | `min_gaps` | gap count, asc | |
//! | `early_bird` | earliest start, asc | ends by 14:00 |
//! | `night_owl` | earliest start, desc | starts at 10:00 or later |
//! | `compact` | gap minutes, asc | |
//! | `preferred_times` | preferred slots, desc | |

use serde::Serialize;

use super::filter::{FilterOptions, SortKey, SortOrder};
use crate::models::ClockTime;

/// A named, ready-made set of filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub filters: FilterOptions,
}

impl Preset {
    fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        filters: FilterOptions,
    ) -> Self {
        Self {
            id,
            name,
            description,
            filters,
        }
    }
}

/// All presets in display order.
pub fn presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "max_free_days",
            "Max free days",
            "Schedules with the most days without classes",
            FilterOptions::new().sorted_by(SortKey::FreeDays, SortOrder::Desc),
        ),
        Preset::new(
            "min_gaps",
            "Fewest gaps",
            "Schedules with the fewest idle periods between classes",
            FilterOptions::new().sorted_by(SortKey::GapsCount, SortOrder::Asc),
        ),
        Preset::new(
            "early_bird",
            "Early bird",
            "Classes early in the day, finishing by 14:00",
            FilterOptions::new()
                .with_latest_end(ClockTime::at(14, 0))
                .sorted_by(SortKey::EarliestStart, SortOrder::Asc),
        ),
        Preset::new(
            "night_owl",
            "Night owl",
            "Classes later in the day, starting at 10:00 or later",
            FilterOptions::new()
                .with_earliest_start(ClockTime::at(10, 0))
                .sorted_by(SortKey::EarliestStart, SortOrder::Desc),
        ),
        Preset::new(
            "compact",
            "Compact",
            "Schedules with the least idle time between classes",
            FilterOptions::new().sorted_by(SortKey::GapsMinutes, SortOrder::Asc),
        ),
        Preset::new(
            "preferred_times",
            "Preferred times",
            "Schedules that best use your preferred slots",
            FilterOptions::new().sorted_by(SortKey::PreferredSlots, SortOrder::Desc),
        ),
    ]
}

/// Looks up a preset by id.
pub fn preset(id: &str) -> Option<Preset> {
    presets().into_iter().find(|p| p.id == id)
}
