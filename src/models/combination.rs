//! Schedule combination (solution) model.
//!
//! A combination is one conflict-free choice of exactly one section per
//! requested course, annotated with quality metrics. Metrics are derived
//! data: they are recomputed whenever the section list changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ClassSection, ClockTime, Day, SlotPreference, TimeBlock};
use crate::scheduler::compute_metrics;

/// Quality metrics of a combination.
///
/// Defaults describe an empty timetable: no gaps, `earliestStart = 23:59`,
/// `latestEnd = 00:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    /// Teaching days (Mon..Sat) with no class.
    pub free_days: u32,
    /// Idle intervals between consecutive same-day classes.
    pub gaps_count: u32,
    /// Total idle minutes across those intervals.
    pub gaps_minutes: u32,
    /// Class blocks fully inside a preferred slot.
    pub preferred_slots_used: u32,
    /// Earliest class start across the week.
    pub earliest_start: ClockTime,
    /// Latest class end across the week.
    pub latest_end: ClockTime,
}

impl Default for ScheduleMetrics {
    fn default() -> Self {
        Self {
            free_days: 0,
            gaps_count: 0,
            gaps_minutes: 0,
            preferred_slots_used: 0,
            earliest_start: ClockTime::LAST_MINUTE,
            latest_end: ClockTime::MIDNIGHT,
        }
    }
}

/// A conflict-free assignment of one section per course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCombination {
    /// Opaque unique token.
    pub id: String,
    sections: Vec<ClassSection>,
    /// Sum of the chosen courses' credits (0 when no catalog was supplied).
    pub total_credits: u32,
    #[serde(flatten)]
    metrics: ScheduleMetrics,
}

impl ScheduleCombination {
    /// Creates a combination and computes its metrics.
    pub fn new(
        id: impl Into<String>,
        sections: Vec<ClassSection>,
        preferences: &[SlotPreference],
    ) -> Self {
        let mut combination = Self {
            id: id.into(),
            sections,
            total_credits: 0,
            metrics: ScheduleMetrics::default(),
        };
        compute_metrics(&mut combination, preferences);
        combination
    }

    /// Sets the total credit count.
    pub fn with_total_credits(mut self, credits: u32) -> Self {
        self.total_credits = credits;
        self
    }

    /// Chosen sections, in course iteration order.
    pub fn sections(&self) -> &[ClassSection] {
        &self.sections
    }

    /// Replaces the section list and recomputes metrics from scratch.
    pub fn set_sections(&mut self, sections: Vec<ClassSection>, preferences: &[SlotPreference]) {
        self.sections = sections;
        self.metrics = ScheduleMetrics::default();
        compute_metrics(self, preferences);
    }

    /// Current metrics.
    pub fn metrics(&self) -> &ScheduleMetrics {
        &self.metrics
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut ScheduleMetrics {
        &mut self.metrics
    }

    /// Whether the combination holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of chosen sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Finds the chosen section of a course.
    pub fn section_for_course(&self, course_code: &str) -> Option<&ClassSection> {
        self.sections
            .iter()
            .find(|s| s.course_code.eq_ignore_ascii_case(course_code))
    }

    /// Every meeting block of every chosen section.
    pub fn blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    /// Blocks grouped by day, each day's list sorted by start time.
    pub fn blocks_by_day(&self) -> BTreeMap<Day, Vec<TimeBlock>> {
        let mut by_day: BTreeMap<Day, Vec<TimeBlock>> = BTreeMap::new();
        for block in self.blocks() {
            by_day.entry(block.day()).or_default().push(*block);
        }
        for blocks in by_day.values_mut() {
            blocks.sort_by_key(|b| b.start());
        }
        by_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScheduleCombination {
        let sections = vec![
            ClassSection::new("MATH1", "A")
                .with_block(TimeBlock::parse(Day::Wednesday, "10:00", "12:00").unwrap())
                .with_block(TimeBlock::parse(Day::Monday, "08:00", "10:00").unwrap()),
            ClassSection::new("PHYS1", "B")
                .with_block(TimeBlock::parse(Day::Monday, "07:00", "08:00").unwrap()),
        ];
        ScheduleCombination::new("c1", sections, &[])
    }

    #[test]
    fn test_default_metrics() {
        let m = ScheduleMetrics::default();
        assert_eq!(m.earliest_start.to_string(), "23:59");
        assert_eq!(m.latest_end.to_string(), "00:00");
    }

    #[test]
    fn test_empty_combination_keeps_defaults() {
        let c = ScheduleCombination::new("empty", Vec::new(), &[]);
        assert!(c.is_empty());
        assert_eq!(c.metrics(), &ScheduleMetrics::default());
    }

    #[test]
    fn test_blocks_by_day_sorted() {
        let c = sample();
        let by_day = c.blocks_by_day();
        assert_eq!(by_day.len(), 2);
        let monday = &by_day[&Day::Monday];
        assert_eq!(monday[0].start().to_string(), "07:00");
        assert_eq!(monday[1].start().to_string(), "08:00");
    }

    #[test]
    fn test_section_for_course() {
        let c = sample();
        assert_eq!(c.section_for_course("phys1").unwrap().section_code, "B");
        assert!(c.section_for_course("CHEM1").is_none());
        assert_eq!(c.section_count(), 2);
    }

    #[test]
    fn test_set_sections_recomputes() {
        let mut c = sample();
        assert_eq!(c.metrics().free_days, 4);
        c.set_sections(Vec::new(), &[]);
        assert_eq!(c.metrics(), &ScheduleMetrics::default());
    }

    #[test]
    fn test_json_flattens_metrics() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["freeDays"], 4);
        assert_eq!(json["earliestStart"], "07:00");
        assert_eq!(json["latestEnd"], "12:00");
        assert_eq!(json["sections"].as_array().unwrap().len(), 2);
    }
}
