//! Declarative filters and ordering for combination lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, ScheduleCombination};

/// Metric to order combinations by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    FreeDays,
    GapsCount,
    GapsMinutes,
    PreferredSlots,
    EarliestStart,
    LatestEnd,
}

impl SortKey {
    /// Metric value of a combination (times as minutes since midnight).
    pub fn value(self, combination: &ScheduleCombination) -> u32 {
        let m = combination.metrics();
        match self {
            SortKey::FreeDays => m.free_days,
            SortKey::GapsCount => m.gaps_count,
            SortKey::GapsMinutes => m.gaps_minutes,
            SortKey::PreferredSlots => m.preferred_slots_used,
            SortKey::EarliestStart => u32::from(m.earliest_start.minutes()),
            SortKey::LatestEnd => u32::from(m.latest_end.minutes()),
        }
    }

    /// Whether lower values are always surfaced first for this key.
    pub fn is_gap_key(self) -> bool {
        matches!(self, SortKey::GapsCount | SortKey::GapsMinutes)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter and sort options. All filters are optional and combined with AND.
///
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterOptions {
    /// Keep combinations with at least this many free days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_free_days: Option<u32>,
    /// Keep combinations with at most this many gaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gaps: Option<u32>,
    /// Keep combinations with at most this many gap minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_minutes: Option<u32>,
    /// Keep combinations starting at or after this time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_start: Option<ClockTime>,
    /// Keep combinations ending at or before this time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_end: Option<ClockTime>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl FilterOptions {
    /// Options with no filters, sorted by free days descending.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_free_days(mut self, days: u32) -> Self {
        self.min_free_days = Some(days);
        self
    }

    pub fn with_max_gaps(mut self, gaps: u32) -> Self {
        self.max_gaps = Some(gaps);
        self
    }

    pub fn with_max_gap_minutes(mut self, minutes: u32) -> Self {
        self.max_gap_minutes = Some(minutes);
        self
    }

    pub fn with_earliest_start(mut self, time: ClockTime) -> Self {
        self.earliest_start = Some(time);
        self
    }

    pub fn with_latest_end(mut self, time: ClockTime) -> Self {
        self.latest_end = Some(time);
        self
    }

    /// Sets sort key and direction.
    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// Whether a combination passes every configured filter.
    pub fn matches(&self, combination: &ScheduleCombination) -> bool {
        let m = combination.metrics();
        self.min_free_days.map_or(true, |v| m.free_days >= v)
            && self.max_gaps.map_or(true, |v| m.gaps_count <= v)
            && self.max_gap_minutes.map_or(true, |v| m.gaps_minutes <= v)
            && self.earliest_start.map_or(true, |t| m.earliest_start >= t)
            && self.latest_end.map_or(true, |t| m.latest_end <= t)
    }

    /// Ordering used by [`filter_combinations`].
    ///
    /// Gap keys always order fewer-first regardless of `sort_order`; every
    /// other key honors the requested direction.
    pub fn compare(&self, a: &ScheduleCombination, b: &ScheduleCombination) -> Ordering {
        let (va, vb) = (self.sort_by.value(a), self.sort_by.value(b));
        if self.sort_by.is_gap_key() {
            return va.cmp(&vb);
        }
        match self.sort_order {
            SortOrder::Asc => va.cmp(&vb),
            SortOrder::Desc => vb.cmp(&va),
        }
    }
}

/// Filters and orders combinations. The sort is stable.
pub fn filter_combinations(
    combinations: Vec<ScheduleCombination>,
    options: &FilterOptions,
) -> Vec<ScheduleCombination> {
    let mut kept: Vec<ScheduleCombination> = combinations
        .into_iter()
        .filter(|c| options.matches(c))
        .collect();
    kept.sort_by(|a, b| options.compare(a, b));
    kept
}
