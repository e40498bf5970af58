//! Schedule quality metrics.
//!
//! Computes per-combination indicators used for ranking.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Free days | Teaching days (Mon..Sat) with no class |
//! | Gaps count | Positive idle intervals between consecutive same-day classes |
//! | Gaps minutes | Sum of those idle intervals |
//! | Earliest start | Minimum class start across the week |
//! | Latest end | Maximum class end across the week |
//! | Preferred slots used | Class blocks nested inside a preferred slot |

use std::collections::BTreeMap;

use crate::models::{
    preferred_blocks, ClassSection, ClockTime, Day, ScheduleCombination, ScheduleMetrics,
    SlotPreference, TimeBlock,
};

/// Recomputes the metrics of a combination in place.
///
/// A combination without sections is left untouched. Calling this twice
/// yields identical metrics.
pub fn compute_metrics(combination: &mut ScheduleCombination, preferences: &[SlotPreference]) {
    if combination.is_empty() {
        return;
    }
    let metrics = calculate_metrics(combination.sections(), preferences);
    *combination.metrics_mut() = metrics;
}

/// Computes metrics for a list of sections.
pub fn calculate_metrics(sections: &[ClassSection], preferences: &[SlotPreference]) -> ScheduleMetrics {
    let mut by_day: BTreeMap<Day, Vec<&TimeBlock>> = BTreeMap::new();
    for block in sections.iter().flat_map(|s| s.blocks.iter()) {
        by_day.entry(block.day()).or_default().push(block);
    }

    let mut metrics = ScheduleMetrics {
        free_days: Day::TEACHING_DAYS
            .iter()
            .filter(|d| !by_day.contains_key(*d))
            .count() as u32,
        ..ScheduleMetrics::default()
    };

    let mut earliest: Option<ClockTime> = None;
    let mut latest: Option<ClockTime> = None;
    for blocks in by_day.values_mut() {
        blocks.sort_by_key(|b| b.start());

        for pair in blocks.windows(2) {
            let current_end = pair[0].end().minutes();
            let next_start = pair[1].start().minutes();
            if next_start > current_end {
                metrics.gaps_count += 1;
                metrics.gaps_minutes += u32::from(next_start - current_end);
            }
        }

        for block in blocks.iter() {
            earliest = Some(earliest.map_or(block.start(), |e| e.min(block.start())));
            latest = Some(latest.map_or(block.end(), |l| l.max(block.end())));
        }
    }
    if let (Some(earliest), Some(latest)) = (earliest, latest) {
        metrics.earliest_start = earliest;
        metrics.latest_end = latest;
    }

    metrics.preferred_slots_used = count_preferred(sections, preferences);
    metrics
}

/// Counts class blocks fully nested in at least one preferred slot.
///
/// Each block counts at most once even if several preferred slots contain it.
fn count_preferred(sections: &[ClassSection], preferences: &[SlotPreference]) -> u32 {
    let preferred = preferred_blocks(preferences);
    if preferred.is_empty() {
        return 0;
    }
    sections
        .iter()
        .flat_map(|s| s.blocks.iter())
        .filter(|block| preferred.iter().any(|p| p.contains(*block)))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(day: Day, start: &str, end: &str) -> TimeBlock {
        TimeBlock::parse(day, start, end).unwrap()
    }

    fn section(course: &str, blocks: Vec<TimeBlock>) -> ClassSection {
        blocks
            .into_iter()
            .fold(ClassSection::new(course, "A"), |s, b| s.with_block(b))
    }

    #[test]
    fn test_metrics_basic() {
        // Monday: 08-10, 12-14 (gap 120). Wednesday: 07-09.
        let sections = vec![
            section("MATH1", vec![block(Day::Monday, "08:00", "10:00")]),
            section(
                "PHYS1",
                vec![
                    block(Day::Monday, "12:00", "14:00"),
                    block(Day::Wednesday, "07:00", "09:00"),
                ],
            ),
        ];
        let m = calculate_metrics(&sections, &[]);
        assert_eq!(m.free_days, 4);
        assert_eq!(m.gaps_count, 1);
        assert_eq!(m.gaps_minutes, 120);
        assert_eq!(m.earliest_start.to_string(), "07:00");
        assert_eq!(m.latest_end.to_string(), "14:00");
        assert_eq!(m.preferred_slots_used, 0);
    }

    #[test]
    fn test_back_to_back_is_not_a_gap() {
        let sections = vec![
            section("A", vec![block(Day::Tuesday, "08:00", "10:00")]),
            section("B", vec![block(Day::Tuesday, "10:00", "12:00")]),
        ];
        let m = calculate_metrics(&sections, &[]);
        assert_eq!(m.gaps_count, 0);
        assert_eq!(m.gaps_minutes, 0);
    }

    #[test]
    fn test_sunday_not_counted_as_free_day() {
        let sections = vec![section("A", vec![block(Day::Sunday, "08:00", "10:00")])];
        let m = calculate_metrics(&sections, &[]);
        assert_eq!(m.free_days, 6);

        let sections = vec![section("A", vec![block(Day::Saturday, "08:00", "10:00")])];
        assert_eq!(calculate_metrics(&sections, &[]).free_days, 5);
    }

    #[test]
    fn test_preferred_slots_counted_once_per_block() {
        let sections = vec![section(
            "A",
            vec![
                block(Day::Monday, "08:00", "10:00"),  // inside both prefs
                block(Day::Monday, "11:00", "13:00"),  // partially inside
                block(Day::Thursday, "08:00", "09:00"), // wrong day
            ],
        )];
        let prefs = vec![
            SlotPreference::preferred(block(Day::Monday, "07:00", "12:00")),
            SlotPreference::preferred(block(Day::Monday, "08:00", "10:00")),
            SlotPreference::blocked(block(Day::Thursday, "07:00", "12:00")),
        ];
        assert_eq!(calculate_metrics(&sections, &prefs).preferred_slots_used, 1);
    }

    #[test]
    fn test_compute_metrics_empty_is_noop() {
        let mut c = ScheduleCombination::new("x", Vec::new(), &[]);
        compute_metrics(&mut c, &[]);
        assert_eq!(c.metrics(), &ScheduleMetrics::default());
    }

    #[test]
    fn test_sections_without_blocks() {
        let m = calculate_metrics(&[ClassSection::new("A", "1")], &[]);
        assert_eq!(m.free_days, 6);
        assert_eq!(m.earliest_start.to_string(), "23:59");
        assert_eq!(m.latest_end.to_string(), "00:00");
    }

    fn arb_section() -> impl Strategy<Value = ClassSection> {
        prop::collection::vec((0usize..7, 6u16..20, 1u16..4), 1..4).prop_map(|slots| {
            slots.into_iter().fold(ClassSection::new("C", "S"), |s, (d, h, len)| {
                let start = ClockTime::from_hm(h, 0).unwrap();
                let end = ClockTime::from_hm(h + len, 0).unwrap();
                s.with_block(TimeBlock::new(Day::ALL[d], start, end).unwrap())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_compute_metrics_idempotent(sections in prop::collection::vec(arb_section(), 1..4)) {
            let prefs = vec![SlotPreference::preferred(block(Day::Monday, "06:00", "12:00"))];
            let mut c = ScheduleCombination::new("p", sections, &prefs);
            let first = c.metrics().clone();
            compute_metrics(&mut c, &prefs);
            prop_assert_eq!(&first, c.metrics());
            prop_assert!(first.free_days <= 6);
        }
    }
}
