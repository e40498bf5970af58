//! Class section model.
//!
//! A section is one concrete offering of a course: a section code plus the
//! weekly time blocks it meets in.

use serde::{Deserialize, Serialize};

use super::{deserialize_code, normalize_code, TimeBlock};

/// A class section of a course.
///
/// Course and section codes are trimmed and upper-cased on construction and
/// on deserialization. Block order is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    /// Code of the course this section belongs to.
    #[serde(deserialize_with = "deserialize_code")]
    pub course_code: String,
    /// Section identifier, unique within the course (e.g. "A1").
    #[serde(deserialize_with = "deserialize_code")]
    pub section_code: String,
    /// Weekly meeting blocks.
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
    /// Instructor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    /// Classroom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClassSection {
    /// Creates a section with no blocks.
    pub fn new(course_code: impl AsRef<str>, section_code: impl AsRef<str>) -> Self {
        Self {
            course_code: normalize_code(course_code.as_ref()),
            section_code: normalize_code(section_code.as_ref()),
            blocks: Vec::new(),
            professor: None,
            location: None,
        }
    }

    /// Adds a meeting block.
    pub fn with_block(mut self, block: TimeBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Sets the instructor.
    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = Some(professor.into());
        self
    }

    /// Sets the classroom.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether any block of this section overlaps any block of `other`.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.blocks
            .iter()
            .any(|a| other.blocks.iter().any(|b| a.overlaps(b)))
    }

    /// Whether any block of this section overlaps any of `blocks`.
    pub fn conflicts_with_blocks<'a, I>(&self, blocks: I) -> bool
    where
        I: IntoIterator<Item = &'a TimeBlock>,
        I::IntoIter: Clone,
    {
        let blocks = blocks.into_iter();
        self.blocks
            .iter()
            .any(|own| blocks.clone().any(|b| own.overlaps(b)))
    }

    /// Total weekly meeting time (minutes).
    pub fn weekly_minutes(&self) -> u32 {
        self.blocks.iter().map(|b| u32::from(b.duration_minutes())).sum()
    }
}
