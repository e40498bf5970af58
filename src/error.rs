//! Error types for timetable and catalog operations.

use thiserror::Error;

/// Main error type for u-timetable operations.
///
/// Validation problems found while checking a whole catalog or a raw
/// section payload are reported through
/// [`ValidationReport`](crate::validation::ValidationReport) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimetableError {
    /// Time string not in `HH:MM` form or out of range.
    #[error("Invalid time '{0}': expected HH:MM between 00:00 and 23:59")]
    InvalidTime(String),

    /// Day tag not one of `L M W J V S D`.
    #[error("Invalid day '{0}'")]
    InvalidDay(String),

    /// Time block whose end is not after its start.
    #[error("End time {end} must be after start time {start}")]
    InvalidBlock { start: String, end: String },

    /// A numeric course field is outside its allowed range.
    #[error("{field} out of range: {value}")]
    FieldOutOfRange { field: &'static str, value: String },

    /// Referenced course does not exist in the catalog.
    #[error("Course '{0}' not found")]
    CourseNotFound(String),

    /// Course code already present in the catalog.
    #[error("Course with code '{0}' already exists")]
    DuplicateCourse(String),

    /// Prerequisite code does not exist in the catalog.
    #[error("Prerequisite '{0}' not found in pensum")]
    UnknownPrerequisite(String),

    /// Corequisite code does not exist in the catalog.
    #[error("Corequisite '{0}' not found in pensum")]
    UnknownCorequisite(String),

    /// Course cannot be removed while other courses reference it.
    #[error("Cannot delete: course '{code}' is a prerequisite/corequisite for {}", .dependents.join(", "))]
    HasDependents {
        code: String,
        dependents: Vec<String>,
    },

    /// Mutation rejected because the resulting catalog fails validation.
    #[error("Update would create invalid pensum: {}", .errors.join("; "))]
    InvalidCatalog { errors: Vec<String> },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for u-timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
