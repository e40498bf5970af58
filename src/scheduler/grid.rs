//! Weekly grid view of a combination.
//!
//! Lays a combination out on Monday..Saturday columns with 30-minute rows
//! from 06:00 to 21:30, the shape a timetable UI renders directly.

use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, Day, ScheduleCombination, ScheduleMetrics};

/// First row of the grid.
pub const GRID_START: ClockTime = ClockTime::at(6, 0);
/// End of the last row (exclusive).
pub const GRID_END: ClockTime = ClockTime::at(22, 0);
/// Row height in minutes.
pub const GRID_STEP_MINUTES: u16 = 30;

/// A grid cell occupied by a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub course_code: String,
    pub section_code: String,
    pub professor: Option<String>,
    pub location: Option<String>,
    /// Whether this row is the block's first.
    pub is_start: bool,
    pub start: ClockTime,
    pub end: ClockTime,
}

/// One day column; `cells[i]` matches `ScheduleGrid::time_slots[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    pub day: Day,
    pub cells: Vec<Option<GridCell>>,
}

/// Grid rendering of a combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGrid {
    pub time_slots: Vec<ClockTime>,
    pub columns: Vec<GridColumn>,
    pub metrics: ScheduleMetrics,
}

impl ScheduleGrid {
    /// Cell at a day and slot start time.
    pub fn cell(&self, day: Day, time: ClockTime) -> Option<&GridCell> {
        let row = self.time_slots.iter().position(|&t| t == time)?;
        self.columns
            .iter()
            .find(|c| c.day == day)?
            .cells
            .get(row)?
            .as_ref()
    }
}

/// Builds the grid for a combination.
///
/// Sunday blocks are not shown. When two blocks cover the same row, the
/// later section in the combination wins.
pub fn schedule_grid(combination: &ScheduleCombination) -> ScheduleGrid {
    let time_slots: Vec<ClockTime> = (GRID_START.minutes()..GRID_END.minutes())
        .step_by(usize::from(GRID_STEP_MINUTES))
        .filter_map(|m| ClockTime::from_minutes(m).ok())
        .collect();

    let mut columns: Vec<GridColumn> = Day::TEACHING_DAYS
        .iter()
        .map(|&day| GridColumn {
            day,
            cells: vec![None; time_slots.len()],
        })
        .collect();

    for section in combination.sections() {
        for block in &section.blocks {
            let Some(column) = columns.iter_mut().find(|c| c.day == block.day()) else {
                continue;
            };
            for (row, &slot) in time_slots.iter().enumerate() {
                if block.covers(slot) {
                    column.cells[row] = Some(GridCell {
                        course_code: section.course_code.clone(),
                        section_code: section.section_code.clone(),
                        professor: section.professor.clone(),
                        location: section.location.clone(),
                        is_start: slot == block.start(),
                        start: block.start(),
                        end: block.end(),
                    });
                }
            }
        }
    }

    ScheduleGrid {
        time_slots,
        columns,
        metrics: combination.metrics().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassSection, TimeBlock};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let grid = schedule_grid(&ScheduleCombination::new("g", Vec::new(), &[]));
        assert_eq!(grid.time_slots.len(), 32);
        assert_eq!(grid.time_slots[0], t("06:00"));
        assert_eq!(grid.time_slots[31], t("21:30"));
        assert_eq!(grid.columns.len(), 6);
        assert!(grid.columns.iter().all(|c| c.cells.iter().all(Option::is_none)));
    }

    #[test]
    fn test_grid_marks_covered_rows() {
        let combination = ScheduleCombination::new(
            "g",
            vec![ClassSection::new("MATH1", "A")
                .with_professor("Dr. Vega")
                .with_block(TimeBlock::parse(Day::Tuesday, "08:00", "09:30").unwrap())
                .with_block(TimeBlock::parse(Day::Sunday, "08:00", "09:30").unwrap())],
            &[],
        );
        let grid = schedule_grid(&combination);

        let first = grid.cell(Day::Tuesday, t("08:00")).unwrap();
        assert!(first.is_start);
        assert_eq!(first.professor.as_deref(), Some("Dr. Vega"));
        assert!(!grid.cell(Day::Tuesday, t("09:00")).unwrap().is_start);
        assert!(grid.cell(Day::Tuesday, t("09:30")).is_none());
        assert!(grid.cell(Day::Monday, t("08:00")).is_none());
        assert!(grid.cell(Day::Sunday, t("08:00")).is_none());
        assert_eq!(grid.metrics.latest_end, t("09:30"));
    }

    #[test]
    fn test_off_grid_start_still_fills_rows() {
        let combination = ScheduleCombination::new(
            "g",
            vec![ClassSection::new("A", "1")
                .with_block(TimeBlock::parse(Day::Friday, "08:15", "09:15").unwrap())],
            &[],
        );
        let grid = schedule_grid(&combination);
        assert!(grid.cell(Day::Friday, t("08:00")).is_none());
        let cell = grid.cell(Day::Friday, t("08:30")).unwrap();
        assert!(!cell.is_start);
        assert!(grid.cell(Day::Friday, t("09:00")).is_some());
    }
}
