//! Validation reports and raw section input checks.
//!
//! Problems found while checking a payload are collected into a
//! [`ValidationReport`] rather than returned as errors, so a caller sees every
//! issue at once. The catalog validator in [`crate::catalog`] reports through
//! the same type.
//!
//! Section payloads arrive with every field optional ([`RawSectionInput`]) and
//! are checked for:
//! - Missing course or section code
//! - Section code longer than 10 characters
//! - Missing time blocks
//! - Per block: missing day/start/end, unknown day tag, malformed `HH:MM`,
//!   end not after start

use serde::{Deserialize, Serialize};

use crate::models::{ClassSection, ClockTime, Day, TimeBlock};

/// Maximum length of a section code.
pub const MAX_SECTION_CODE_LEN: usize = 10;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    /// A required field is absent or blank.
    MissingField,
    /// A field exceeds its length limit.
    TooLong,
    /// Day tag not one of `L M W J V S D`.
    InvalidDay,
    /// Time string is not `HH:MM`.
    InvalidTimeFormat,
    /// Block end is not after its start.
    InvalidTimeRange,
    /// A prerequisite or corequisite names a course not in the catalog.
    UnknownReference,
    /// A prerequisite is not in an earlier semester than its dependent.
    SemesterOrder,
    /// The requirement graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `true` when `errors` is empty.
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    /// Up to five course codes left unprocessed by cycle detection.
    ///
    /// This is a superset sample of the cycle: it may include courses that
    /// only depend on a cycle without being part of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_witness: Option<Vec<String>>,
}

impl ValidationReport {
    /// Builds a report from collected errors.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            cycle_witness: None,
        }
    }

    /// Attaches a cycle witness.
    pub fn with_cycle_witness(mut self, witness: Vec<String>) -> Self {
        self.cycle_witness = Some(witness);
        self
    }

    /// Error messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether any error is of the given kind.
    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

/// A time block as received, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlockInput {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl RawBlockInput {
    pub fn new(day: &str, start: &str, end: &str) -> Self {
        Self {
            day: Some(day.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }
}

/// A section as received, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSectionInput {
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub section_code: Option<String>,
    #[serde(default)]
    pub blocks: Vec<RawBlockInput>,
    #[serde(default)]
    pub professor: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl RawSectionInput {
    /// Validates and converts into a [`ClassSection`].
    ///
    /// # Errors
    /// Returns the full report when any check fails.
    pub fn into_section(self) -> Result<ClassSection, ValidationReport> {
        let (report, blocks) = check_section(&self);
        if !report.valid {
            return Err(report);
        }
        let mut section = ClassSection::new(
            self.course_code.as_deref().unwrap_or_default(),
            self.section_code.as_deref().unwrap_or_default(),
        );
        section.blocks = blocks;
        section.professor = self.professor.filter(|p| !p.trim().is_empty());
        section.location = self.location.filter(|l| !l.trim().is_empty());
        Ok(section)
    }
}

/// Checks a raw section payload and reports every problem found.
pub fn validate_section_input(input: &RawSectionInput) -> ValidationReport {
    check_section(input).0
}

fn check_section(input: &RawSectionInput) -> (ValidationReport, Vec<TimeBlock>) {
    use ValidationErrorKind as K;

    let mut errors = Vec::new();
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    if !present(&input.course_code) {
        errors.push(ValidationError::new(K::MissingField, "Course code is required"));
    }
    match input.section_code.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(ValidationError::new(K::MissingField, "Section code is required"));
        }
        Some(code) if code.chars().count() > MAX_SECTION_CODE_LEN => {
            errors.push(ValidationError::new(
                K::TooLong,
                format!("Section code must be at most {MAX_SECTION_CODE_LEN} characters"),
            ));
        }
        Some(_) => {}
    }
    if input.blocks.is_empty() {
        errors.push(ValidationError::new(
            K::MissingField,
            "At least one time block is required",
        ));
    }

    let mut blocks = Vec::with_capacity(input.blocks.len());
    for (i, raw) in input.blocks.iter().enumerate() {
        let n = i + 1;
        let before = errors.len();
        let required = |value: &Option<String>, what: &str, errors: &mut Vec<ValidationError>| {
            if !present(value) {
                errors.push(ValidationError::new(
                    K::MissingField,
                    format!("Block {n}: {what} is required"),
                ));
            }
        };
        required(&raw.day, "Day", &mut errors);
        required(&raw.start, "Start time", &mut errors);
        required(&raw.end, "End time", &mut errors);
        if errors.len() > before {
            continue;
        }
        let (Some(day), Some(start), Some(end)) = (&raw.day, &raw.start, &raw.end) else {
            continue;
        };

        let day = match day.parse::<Day>() {
            Ok(day) => Some(day),
            Err(_) => {
                errors.push(ValidationError::new(
                    K::InvalidDay,
                    format!("Block {n}: Invalid day '{}'", day.trim()),
                ));
                None
            }
        };
        let times = match (start.trim().parse::<ClockTime>(), end.trim().parse::<ClockTime>()) {
            (Ok(start), Ok(end)) => Some((start, end)),
            _ => {
                errors.push(ValidationError::new(
                    K::InvalidTimeFormat,
                    format!("Block {n}: Invalid time format"),
                ));
                None
            }
        };
        let Some((start, end)) = times else {
            continue;
        };
        if end <= start {
            errors.push(ValidationError::new(
                K::InvalidTimeRange,
                format!("Block {n}: End time must be after start time"),
            ));
            continue;
        }
        if let Some(Ok(block)) = day.map(|d| TimeBlock::new(d, start, end)) {
            blocks.push(block);
        }
    }

    (ValidationReport::from_errors(errors), blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RawSectionInput {
        RawSectionInput {
            course_code: Some("calc101".into()),
            section_code: Some("a1".into()),
            blocks: vec![
                RawBlockInput::new("L", "08:00", "10:00"),
                RawBlockInput::new("W", "8:00", "10:00"),
            ],
            professor: Some("Dr. Ruiz".into()),
            location: Some("  ".into()),
        }
    }

    #[test]
    fn test_valid_input() {
        let report = validate_section_input(&valid_input());
        assert!(report.valid);
        assert!(report.errors.is_empty());

        let section = valid_input().into_section().unwrap();
        assert_eq!(section.course_code, "CALC101");
        assert_eq!(section.section_code, "A1");
        assert_eq!(section.blocks.len(), 2);
        assert_eq!(section.blocks[1].start().to_string(), "08:00");
        assert_eq!(section.professor.as_deref(), Some("Dr. Ruiz"));
        assert!(section.location.is_none());
    }

    #[test]
    fn test_missing_codes_and_blocks() {
        let report = validate_section_input(&RawSectionInput::default());
        assert!(!report.valid);
        assert_eq!(
            report.messages(),
            vec![
                "Course code is required",
                "Section code is required",
                "At least one time block is required",
            ]
        );
    }

    #[test]
    fn test_section_code_too_long() {
        let input = RawSectionInput {
            section_code: Some("ABCDEFGHIJK".into()),
            ..valid_input()
        };
        let report = validate_section_input(&input);
        assert!(report.has(ValidationErrorKind::TooLong));
    }

    #[test]
    fn test_block_errors_are_numbered() {
        let input = RawSectionInput {
            blocks: vec![
                RawBlockInput::new("L", "08:00", "10:00"),
                RawBlockInput {
                    day: None,
                    ..RawBlockInput::new("M", "08:00", "09:00")
                },
                RawBlockInput::new("M", "8h", "10:00"),
                RawBlockInput::new("J", "10:00", "09:00"),
                RawBlockInput::new("X", "10:00", "11:00"),
            ],
            ..valid_input()
        };
        let report = validate_section_input(&input);
        assert_eq!(
            report.messages(),
            vec![
                "Block 2: Day is required",
                "Block 3: Invalid time format",
                "Block 4: End time must be after start time",
                "Block 5: Invalid day 'X'",
            ]
        );
        assert!(input.into_section().is_err());
    }

    #[test]
    fn test_equal_start_and_end_rejected() {
        let input = RawSectionInput {
            blocks: vec![RawBlockInput::new("V", "09:00", "09:00")],
            ..valid_input()
        };
        assert!(validate_section_input(&input).has(ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_raw_input_json() {
        let input: RawSectionInput = serde_json::from_value(serde_json::json!({
            "courseCode": "FIS1",
            "sectionCode": "B",
            "blocks": [{"day": "S", "start": "07:00", "end": "09:00"}]
        }))
        .unwrap();
        let section = input.into_section().unwrap();
        assert_eq!(section.blocks[0].day(), Day::Saturday);

        let report = validate_section_input(&RawSectionInput::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["kind"], "missingField");
        assert!(json.get("cycleWitness").is_none());
    }
}
