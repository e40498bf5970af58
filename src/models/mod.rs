//! Timetable domain models.
//!
//! Request-scoped value types for schedule generation (time blocks,
//! sections, slot preferences, combinations) and the persistent-shaped
//! course catalog.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registrar term | Spanish source term |
//! |-------------|----------------|---------------------|
//! | TimeBlock | Meeting time | Bloque horario |
//! | ClassSection | Section | Clase |
//! | SlotPreference | Availability | Franja |
//! | Course | Course | Materia |
//! | Catalog | Curriculum | Pensum |

mod combination;
mod course;
mod preference;
mod section;
mod time_block;

pub use combination::{ScheduleCombination, ScheduleMetrics};
pub use course::{
    Catalog, Course, CourseStatus, CourseSummary, CREDIT_RANGE, GRADE_RANGE, SEMESTER_RANGE,
};
pub use preference::{blocked_blocks, preferred_blocks, SlotKind, SlotPreference};
pub use section::ClassSection;
pub use time_block::{ClockTime, Day, TimeBlock};

use serde::{Deserialize, Deserializer};

/// Canonical form of a course or section code: trimmed, upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn deserialize_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| normalize_code(&s))
}

fn deserialize_codes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<String>::deserialize(deserializer).map(|v| v.iter().map(|s| normalize_code(s)).collect())
}
