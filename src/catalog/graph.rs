//! Structural validation of the requirement graph.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::models::Catalog;
use crate::validation::{ValidationError, ValidationErrorKind, ValidationReport};

/// Maximum number of codes reported as a cycle witness.
pub const CYCLE_WITNESS_LEN: usize = 5;

/// Validates references, semester ordering and acyclicity of a catalog.
///
/// Checks, per course:
/// 1. Every prerequisite exists in the catalog
/// 2. Every corequisite exists in the catalog
/// 3. Every existing prerequisite sits in a strictly earlier semester
///
/// then runs [`detect_cycle`] over prerequisite and corequisite edges.
///
/// # Returns
/// A report listing every problem; `valid` is `true` only when none was found.
pub fn validate_structure(catalog: &Catalog) -> ValidationReport {
    use ValidationErrorKind as K;

    let codes = catalog.codes();
    let mut errors = Vec::new();

    for course in catalog.courses() {
        for prereq in course.prerequisites.iter().filter(|p| !codes.contains(p.as_str())) {
            errors.push(ValidationError::new(
                K::UnknownReference,
                format!("{}: Prerequisite '{prereq}' not found in pensum", course.code),
            ));
        }
        for coreq in course.corequisites.iter().filter(|c| !codes.contains(c.as_str())) {
            errors.push(ValidationError::new(
                K::UnknownReference,
                format!("{}: Corequisite '{coreq}' not found in pensum", course.code),
            ));
        }
        for prereq in &course.prerequisites {
            let Some(required) = catalog.get(prereq) else {
                continue;
            };
            if required.semester >= course.semester {
                errors.push(ValidationError::new(
                    K::SemesterOrder,
                    format!(
                        "{}: Prerequisite '{prereq}' must be in an earlier semester \
                         (prereq in sem {}, course in sem {})",
                        course.code, required.semester, course.semester
                    ),
                ));
            }
        }
    }

    let witness = detect_cycle(catalog);
    if let Some(nodes) = &witness {
        errors.push(ValidationError::new(
            K::CyclicDependency,
            format!("Circular dependency detected: {}", nodes.join(" -> ")),
        ));
    }

    debug!(courses = catalog.len(), errors = errors.len(), "catalog structure validated");
    let report = ValidationReport::from_errors(errors);
    match witness {
        Some(nodes) => report.with_cycle_witness(nodes),
        None => report,
    }
}

/// Detects a cycle in the requirement graph with Kahn's algorithm.
///
/// Edges run from requirement to dependent for every prerequisite and
/// corequisite that names a course in the catalog.
///
/// # Returns
/// `None` for an acyclic graph. Otherwise up to [`CYCLE_WITNESS_LEN`] codes,
/// sorted, among those left with positive in-degree. These include every
/// cycle member but may also include courses merely downstream of a cycle,
/// so the list is a sample, not an exact cycle.
///
/// # Complexity
/// O(V + E)
///
/// # Reference
/// Kahn (1962), "Topological sorting of large networks"
pub fn detect_cycle(catalog: &Catalog) -> Option<Vec<String>> {
    let mut in_degree: HashMap<&str, usize> = catalog
        .courses()
        .iter()
        .map(|c| (c.code.as_str(), 0))
        .collect();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

    for course in catalog.courses() {
        for required in course.prerequisites.iter().chain(&course.corequisites) {
            if in_degree.contains_key(required.as_str()) {
                successors
                    .entry(required.as_str())
                    .or_default()
                    .push(course.code.as_str());
                *in_degree.entry(course.code.as_str()).or_default() += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(code, _)| *code)
        .collect();
    let mut processed = 0usize;

    while let Some(current) = queue.pop_front() {
        processed += 1;
        for &next in successors.get(current).into_iter().flatten() {
            if let Some(d) = in_degree.get_mut(next) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    if processed == in_degree.len() {
        return None;
    }

    let mut remaining: Vec<String> = in_degree
        .into_iter()
        .filter(|(_, d)| *d > 0)
        .map(|(code, _)| code.to_string())
        .collect();
    remaining.sort();
    remaining.truncate(CYCLE_WITNESS_LEN);
    warn!(witness = ?remaining, "circular dependency in catalog");
    Some(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn chain() -> Catalog {
        Catalog::new(
            "chain",
            vec![
                Course::new("MATH1", "Calculus I", 4, 1),
                Course::new("MATH2", "Calculus II", 4, 2).with_prerequisite("MATH1"),
                Course::new("MATH3", "Calculus III", 4, 3).with_prerequisite("MATH2"),
                Course::new("PHYS1", "Physics I", 3, 2)
                    .with_prerequisite("MATH1")
                    .with_corequisite("MATH2"),
            ],
        )
    }

    #[test]
    fn test_valid_dag() {
        let report = validate_structure(&chain());
        assert!(report.valid, "{:?}", report.messages());
        assert!(report.cycle_witness.is_none());
        assert!(detect_cycle(&chain()).is_none());
    }

    #[test]
    fn test_unknown_references() {
        let catalog = chain().with_course(
            Course::new("CHEM1", "Chemistry", 3, 2)
                .with_prerequisite("BIO1")
                .with_corequisite("LAB9"),
        );
        let report = validate_structure(&catalog);
        assert!(!report.valid);
        assert_eq!(
            report.messages(),
            vec![
                "CHEM1: Prerequisite 'BIO1' not found in pensum",
                "CHEM1: Corequisite 'LAB9' not found in pensum",
            ]
        );
        assert!(report.errors.iter().all(|e| e.kind == ValidationErrorKind::UnknownReference));
    }

    #[test]
    fn test_semester_order() {
        let catalog = Catalog::new(
            "order",
            vec![
                Course::new("CALC101", "Calculus", 4, 3),
                Course::new("CALC201", "Advanced Calculus", 4, 2).with_prerequisite("CALC101"),
            ],
        );
        let report = validate_structure(&catalog);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ValidationErrorKind::SemesterOrder);
        assert!(report.errors[0].message.contains("CALC101"));
        assert!(report.errors[0].message.contains("CALC201"));
        assert!(report.errors[0].message.contains("prereq in sem 3, course in sem 2"));
    }

    #[test]
    fn test_same_semester_prerequisite_rejected() {
        let catalog = Catalog::new(
            "same",
            vec![
                Course::new("A", "A", 3, 2),
                Course::new("B", "B", 3, 2).with_prerequisite("A"),
            ],
        );
        assert!(validate_structure(&catalog).has(ValidationErrorKind::SemesterOrder));
    }

    #[test]
    fn test_cycle_detected() {
        // A -> B -> C -> A
        let catalog = Catalog::new(
            "cycle",
            vec![
                Course::new("A", "A", 3, 1).with_prerequisite("C"),
                Course::new("B", "B", 3, 2).with_prerequisite("A"),
                Course::new("C", "C", 3, 3).with_prerequisite("B"),
            ],
        );
        let report = validate_structure(&catalog);
        assert!(!report.valid);
        assert!(report.has(ValidationErrorKind::CyclicDependency));
        assert_eq!(report.cycle_witness, Some(vec!["A".into(), "B".into(), "C".into()]));
    }

    #[test]
    fn test_corequisite_cycle_detected() {
        let catalog = Catalog::new(
            "coreq",
            vec![
                Course::new("LAB", "Lab", 1, 2).with_corequisite("THEORY"),
                Course::new("THEORY", "Theory", 3, 2).with_corequisite("LAB"),
            ],
        );
        assert!(detect_cycle(&catalog).is_some());
    }

    #[test]
    fn test_witness_includes_downstream_and_is_capped() {
        let mut catalog = Catalog::new(
            "big",
            vec![
                Course::new("X1", "X1", 3, 1).with_prerequisite("X2"),
                Course::new("X2", "X2", 3, 1).with_prerequisite("X1"),
            ],
        );
        for i in 0..6 {
            catalog = catalog.with_course(Course::new(format!("Z{i}"), "Z", 3, 2).with_prerequisite("X1"));
        }
        let witness = detect_cycle(&catalog).unwrap();
        assert_eq!(witness.len(), CYCLE_WITNESS_LEN);
        assert_eq!(witness[..2], ["X1".to_string(), "X2".to_string()]);
        assert!(witness[2].starts_with('Z'));
    }
}
