//! Course create, update and delete with integrity checks.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::graph::validate_structure;
use crate::error::{Result, TimetableError};
use crate::models::{normalize_code, Catalog, Course, CourseStatus};

/// Explicit set of mutable course fields. Absent fields are left unchanged.
///
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CourseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CourseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn with_prerequisites(mut self, codes: &[&str]) -> Self {
        self.prerequisites = Some(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_corequisites(mut self, codes: &[&str]) -> Self {
        self.corequisites = Some(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_status(mut self, status: CourseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn apply(self, course: &mut Course) {
        let codes = |list: Vec<String>| -> Vec<String> {
            list.iter().map(|c| normalize_code(c)).collect()
        };
        if let Some(name) = self.name {
            course.name = name;
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(semester) = self.semester {
            course.semester = semester;
        }
        if let Some(list) = self.prerequisites {
            course.prerequisites = codes(list);
        }
        if let Some(list) = self.corequisites {
            course.corequisites = codes(list);
        }
        if let Some(status) = self.status {
            course.status = status;
        }
        if let Some(grade) = self.grade {
            course.grade = Some(grade);
        }
        if let Some(color) = self.color {
            course.color = Some(color);
        }
    }
}

/// Adds a course to the catalog.
///
/// # Errors
/// - [`TimetableError::FieldOutOfRange`] for a bad field
/// - [`TimetableError::DuplicateCourse`] when the code is taken
/// - [`TimetableError::UnknownPrerequisite`] / [`TimetableError::UnknownCorequisite`]
///   when a requirement is not in the catalog
pub fn create_course(catalog: &mut Catalog, course: Course) -> Result<()> {
    course.check_fields()?;
    if catalog.contains(&course.code) {
        return Err(TimetableError::DuplicateCourse(course.code));
    }
    if let Some(missing) = course.prerequisites.iter().find(|p| !catalog.contains(p)) {
        return Err(TimetableError::UnknownPrerequisite(missing.clone()));
    }
    if let Some(missing) = course.corequisites.iter().find(|c| !catalog.contains(c)) {
        return Err(TimetableError::UnknownCorequisite(missing.clone()));
    }

    info!(code = %course.code, credits = course.credits, semester = course.semester, "course created");
    catalog.push(course);
    Ok(())
}

/// Applies an update to a course and revalidates the whole catalog.
///
/// On any failure the course is restored to its previous state.
///
/// # Errors
/// - [`TimetableError::CourseNotFound`] when the code is unknown
/// - [`TimetableError::FieldOutOfRange`] for a bad updated field
/// - [`TimetableError::InvalidCatalog`] with every validation message when
///   the updated catalog fails [`validate_structure`]
pub fn update_course(catalog: &mut Catalog, code: &str, update: CourseUpdate) -> Result<Course> {
    let code = normalize_code(code);
    let course = catalog
        .get_mut(&code)
        .ok_or_else(|| TimetableError::CourseNotFound(code.clone()))?;
    let previous = course.clone();
    update.apply(course);

    if let Err(e) = course.check_fields() {
        *course = previous;
        return Err(e);
    }

    let report = validate_structure(catalog);
    if !report.valid {
        warn!(code = %code, errors = report.errors.len(), "course update rejected");
        if let Some(course) = catalog.get_mut(&code) {
            *course = previous;
        }
        return Err(TimetableError::InvalidCatalog {
            errors: report.messages(),
        });
    }

    catalog.refresh_totals();
    info!(code = %code, "course updated");
    catalog
        .get(&code)
        .cloned()
        .ok_or(TimetableError::CourseNotFound(code))
}

/// Removes a course that no other course references.
///
/// # Errors
/// - [`TimetableError::CourseNotFound`] when the code is unknown
/// - [`TimetableError::HasDependents`] listing every course that names it as
///   a prerequisite or corequisite
pub fn delete_course(catalog: &mut Catalog, code: &str) -> Result<Course> {
    let code = normalize_code(code);
    if !catalog.contains(&code) {
        return Err(TimetableError::CourseNotFound(code));
    }
    let dependents: Vec<String> = catalog
        .dependents_of(&code)
        .into_iter()
        .filter(|d| *d != code)
        .collect();
    if !dependents.is_empty() {
        warn!(code = %code, ?dependents, "course delete rejected");
        return Err(TimetableError::HasDependents { code, dependents });
    }

    info!(code = %code, "course deleted");
    catalog
        .remove(&code)
        .ok_or(TimetableError::CourseNotFound(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Catalog {
        Catalog::new(
            "program",
            vec![
                Course::new("MATH1", "Calculus I", 4, 1),
                Course::new("MATH2", "Calculus II", 4, 2).with_prerequisite("MATH1"),
                Course::new("PHYS1", "Physics I", 3, 2).with_corequisite("MATH2"),
            ],
        )
    }

    #[test]
    fn test_create_course() {
        let mut catalog = program();
        create_course(
            &mut catalog,
            Course::new("math3", "Calculus III", 4, 3).with_prerequisite("math2"),
        )
        .unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.total_credits(), 15);
        assert_eq!(catalog.get("MATH3").unwrap().prerequisites, vec!["MATH2"]);
    }

    #[test]
    fn test_create_rejects_duplicates_and_unknown_references() {
        let mut catalog = program();
        assert_eq!(
            create_course(&mut catalog, Course::new("Math1", "Again", 3, 1)),
            Err(TimetableError::DuplicateCourse("MATH1".into()))
        );
        assert_eq!(
            create_course(&mut catalog, Course::new("X", "X", 3, 2).with_prerequisite("NOPE")),
            Err(TimetableError::UnknownPrerequisite("NOPE".into()))
        );
        assert_eq!(
            create_course(&mut catalog, Course::new("Y", "Y", 3, 2).with_corequisite("LAB")),
            Err(TimetableError::UnknownCorequisite("LAB".into()))
        );
        assert!(matches!(
            create_course(&mut catalog, Course::new("Z", "Z", 11, 2)),
            Err(TimetableError::FieldOutOfRange { field: "credits", .. })
        ));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_update_course() {
        let mut catalog = program();
        let updated = update_course(
            &mut catalog,
            "math2",
            CourseUpdate::new().with_credits(5).with_name("Calculus 2").with_grade(4.2),
        )
        .unwrap();
        assert_eq!(updated.credits, 5);
        assert_eq!(updated.name, "Calculus 2");
        assert_eq!(updated.grade, Some(4.2));
        assert_eq!(catalog.total_credits(), 12);
    }

    #[test]
    fn test_update_rejected_and_rolled_back() {
        let mut catalog = program();
        let before = catalog.clone();
        let err = update_course(&mut catalog, "MATH1", CourseUpdate::new().with_semester(3)).unwrap_err();
        match err {
            TimetableError::InvalidCatalog { errors } => {
                assert!(errors[0].contains("MATH2: Prerequisite 'MATH1' must be in an earlier semester"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(catalog, before);

        let err = update_course(&mut catalog, "MATH1", CourseUpdate::new().with_prerequisites(&["math2"]));
        assert!(matches!(err, Err(TimetableError::InvalidCatalog { .. })));
        assert_eq!(catalog, before);

        let err = update_course(&mut catalog, "MATH1", CourseUpdate::new().with_grade(7.0));
        assert!(matches!(err, Err(TimetableError::FieldOutOfRange { field: "grade", .. })));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_unknown_course() {
        let mut catalog = program();
        assert_eq!(
            update_course(&mut catalog, "NOPE", CourseUpdate::new()),
            Err(TimetableError::CourseNotFound("NOPE".into()))
        );
    }

    #[test]
    fn test_update_rejects_unknown_fields() {
        let ok: CourseUpdate =
            serde_json::from_value(serde_json::json!({"credits": 3, "status": "passed"})).unwrap();
        assert_eq!(ok.status, Some(CourseStatus::Passed));
        let bad = serde_json::json!({"credits": 3, "code": "NEW"});
        assert!(serde_json::from_value::<CourseUpdate>(bad).is_err());
    }

    #[test]
    fn test_delete_course() {
        let mut catalog = program();
        match delete_course(&mut catalog, "MATH2") {
            Err(TimetableError::HasDependents { code, dependents }) => {
                assert_eq!(code, "MATH2");
                assert_eq!(dependents, vec!["PHYS1"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let removed = delete_course(&mut catalog, "phys1").unwrap();
        assert_eq!(removed.code, "PHYS1");
        assert_eq!(catalog.total_credits(), 8);
        assert_eq!(
            delete_course(&mut catalog, "PHYS1"),
            Err(TimetableError::CourseNotFound("PHYS1".into()))
        );
    }
}
