//! Course ("materia") and catalog ("pensum") models.
//!
//! A catalog is the ordered list of courses of an academic program. Courses
//! reference each other by code through prerequisite and corequisite lists,
//! forming the requirement graph validated by [`crate::catalog`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{deserialize_code, deserialize_codes, normalize_code};
use crate::error::{Result, TimetableError};

/// Allowed credit range per course.
pub const CREDIT_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
/// Allowed semester range.
pub const SEMESTER_RANGE: std::ops::RangeInclusive<u32> = 1..=15;
/// Allowed grade range.
pub const GRADE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

/// Progress status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Not yet taken.
    #[default]
    Pending,
    /// Currently enrolled.
    Enrolled,
    /// Successfully completed.
    Passed,
    /// Failed.
    Failed,
    /// Withdrawn.
    Dropped,
    /// Requirements not met.
    Blocked,
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course code, upper-cased (e.g. "CALC101").
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    /// Course name.
    pub name: String,
    /// Credit weight (1..=10).
    pub credits: u32,
    /// Semester in the program (1..=15).
    pub semester: u32,
    /// Courses that must be passed before this one.
    #[serde(default, deserialize_with = "deserialize_codes")]
    pub prerequisites: Vec<String>,
    /// Courses that must be passed or taken alongside this one.
    #[serde(default, deserialize_with = "deserialize_codes")]
    pub corequisites: Vec<String>,
    #[serde(default)]
    pub status: CourseStatus,
    /// Final grade (0.0..=5.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    /// Display color, `#RRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Course {
    /// Creates a pending course with no requirements.
    pub fn new(code: impl AsRef<str>, name: impl Into<String>, credits: u32, semester: u32) -> Self {
        Self {
            code: normalize_code(code.as_ref()),
            name: name.into(),
            credits,
            semester,
            prerequisites: Vec::new(),
            corequisites: Vec::new(),
            status: CourseStatus::Pending,
            grade: None,
            color: None,
        }
    }

    /// Adds a prerequisite code.
    pub fn with_prerequisite(mut self, code: impl AsRef<str>) -> Self {
        self.prerequisites.push(normalize_code(code.as_ref()));
        self
    }

    /// Adds a corequisite code.
    pub fn with_corequisite(mut self, code: impl AsRef<str>) -> Self {
        self.corequisites.push(normalize_code(code.as_ref()));
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: CourseStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether `code` is listed as a prerequisite.
    pub fn requires(&self, code: &str) -> bool {
        self.prerequisites.iter().any(|p| p == code)
    }

    /// Whether `code` is listed as a corequisite.
    pub fn corequires(&self, code: &str) -> bool {
        self.corequisites.iter().any(|c| c == code)
    }

    /// Whether the course can be taken given passed and enrolled courses.
    ///
    /// Prerequisites must be passed; corequisites must be passed or enrolled.
    pub fn is_available(&self, passed: &HashSet<String>, enrolled: &HashSet<String>) -> bool {
        self.prerequisites.iter().all(|p| passed.contains(p))
            && self
                .corequisites
                .iter()
                .all(|c| passed.contains(c) || enrolled.contains(c))
    }

    /// Checks field ranges and formats.
    ///
    /// # Errors
    /// Returns [`TimetableError::FieldOutOfRange`] for the first bad field.
    pub fn check_fields(&self) -> Result<()> {
        let out_of_range = |field: &'static str, value: String| {
            Err(TimetableError::FieldOutOfRange { field, value })
        };
        if self.code.is_empty() || self.code.chars().count() > 20 {
            return out_of_range("code", self.code.clone());
        }
        if self.name.trim().is_empty() || self.name.chars().count() > 100 {
            return out_of_range("name", self.name.clone());
        }
        if !CREDIT_RANGE.contains(&self.credits) {
            return out_of_range("credits", self.credits.to_string());
        }
        if !SEMESTER_RANGE.contains(&self.semester) {
            return out_of_range("semester", self.semester.to_string());
        }
        if let Some(grade) = self.grade {
            if !GRADE_RANGE.contains(&grade) {
                return out_of_range("grade", grade.to_string());
            }
        }
        if let Some(color) = &self.color {
            let hex = color.strip_prefix('#').unwrap_or("");
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return out_of_range("color", color.clone());
            }
        }
        Ok(())
    }

    /// Short summary used in simulation reports.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            semester: self.semester,
            credits: self.credits,
        }
    }
}

/// Code, name, semester and credits of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub code: String,
    pub name: String,
    pub semester: u32,
    pub credits: u32,
}

/// A program's course catalog.
///
/// `total_credits` is kept equal to the sum of course credits across every
/// mutation, saturating at `u32::MAX`.
///
/// Deserialization checks every course's fields and rejects repeated codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CatalogData")]
pub struct Catalog {
    /// Program name.
    pub name: String,
    courses: Vec<Course>,
    total_credits: u32,
}

#[derive(Deserialize)]
struct CatalogData {
    #[serde(default = "default_catalog_name")]
    name: String,
    #[serde(default)]
    courses: Vec<Course>,
}

fn default_catalog_name() -> String {
    "Mi Pensum".to_string()
}

impl TryFrom<CatalogData> for Catalog {
    type Error = TimetableError;

    fn try_from(data: CatalogData) -> Result<Self> {
        let mut seen = HashSet::new();
        for course in &data.courses {
            course.check_fields()?;
            if !seen.insert(course.code.as_str()) {
                return Err(TimetableError::DuplicateCourse(course.code.clone()));
            }
        }
        Ok(Catalog::new(data.name, data.courses))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_catalog_name(), Vec::new())
    }
}

impl Catalog {
    /// Creates a catalog from a course list.
    pub fn new(name: impl Into<String>, courses: Vec<Course>) -> Self {
        let mut catalog = Self {
            name: name.into(),
            courses,
            total_credits: 0,
        };
        catalog.refresh_totals();
        catalog
    }

    /// Adds a course without any checks (builder for fixtures and loaders).
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self.refresh_totals();
        self
    }

    /// Courses in catalog order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Sum of all course credits.
    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Looks up a course by code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&Course> {
        let code = normalize_code(code);
        self.courses.iter().find(|c| c.code == code)
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut Course> {
        let code = normalize_code(code);
        self.courses.iter_mut().find(|c| c.code == code)
    }

    pub(crate) fn courses_mut(&mut self) -> &mut [Course] {
        &mut self.courses
    }

    /// Whether a course with this code exists.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// All course codes.
    pub fn codes(&self) -> HashSet<&str> {
        self.courses.iter().map(|c| c.code.as_str()).collect()
    }

    /// Courses of one semester.
    pub fn semester_courses(&self, semester: u32) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.semester == semester).collect()
    }

    /// Highest semester number, 0 for an empty catalog.
    pub fn max_semester(&self) -> u32 {
        self.courses.iter().map(|c| c.semester).max().unwrap_or(0)
    }

    /// Total credits of one semester.
    pub fn semester_credits(&self, semester: u32) -> u32 {
        self.courses
            .iter()
            .filter(|c| c.semester == semester)
            .map(|c| c.credits)
            .fold(0, u32::saturating_add)
    }

    /// Codes of courses listing `code` as prerequisite or corequisite.
    pub fn dependents_of(&self, code: &str) -> Vec<String> {
        let code = normalize_code(code);
        self.courses
            .iter()
            .filter(|c| c.requires(&code) || c.corequires(&code))
            .map(|c| c.code.clone())
            .collect()
    }

    pub(crate) fn push(&mut self, course: Course) {
        self.courses.push(course);
        self.refresh_totals();
    }

    pub(crate) fn remove(&mut self, code: &str) -> Option<Course> {
        let idx = self.courses.iter().position(|c| c.code == code)?;
        let removed = self.courses.remove(idx);
        self.refresh_totals();
        Some(removed)
    }

    pub(crate) fn refresh_totals(&mut self) {
        self.total_credits = self
            .courses
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add);
    }
}
