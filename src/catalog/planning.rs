//! Planning queries over a catalog: moves, loss impact, availability and
//! credit load.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::{normalize_code, Catalog, Course, CourseStatus, CourseSummary};

/// Whether a course may be moved to another semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCheck {
    pub can_move: bool,
    /// Every violated ordering rule.
    pub reasons: Vec<String>,
}

/// Checks whether `course` can be placed in `target_semester`.
///
/// The move is rejected when:
/// - a prerequisite is not in a semester strictly before the target
/// - a course requiring this one as prerequisite is at or before the target
/// - a course requiring this one as corequisite is strictly before the target
pub fn can_move_to_semester(course: &Course, target_semester: u32, catalog: &Catalog) -> MoveCheck {
    let mut reasons = Vec::new();

    for prereq in course.prerequisites.iter().filter_map(|p| catalog.get(p)) {
        if prereq.semester >= target_semester {
            reasons.push(format!(
                "Prerequisite '{}' ({}) is in semester {}, which is not before the target semester {target_semester}",
                prereq.name, prereq.code, prereq.semester
            ));
        }
    }

    for other in catalog.courses() {
        if other.requires(&course.code) && other.semester <= target_semester {
            reasons.push(format!(
                "'{}' ({}) in semester {} requires this course as prerequisite",
                other.name, other.code, other.semester
            ));
        }
        if other.corequires(&course.code) && other.semester < target_semester {
            reasons.push(format!(
                "'{}' ({}) in semester {} requires this course as corequisite",
                other.name, other.code, other.semester
            ));
        }
    }

    MoveCheck {
        can_move: reasons.is_empty(),
        reasons,
    }
}

/// Impact of failing or losing a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossSimulation {
    pub lost_course: CourseSummary,
    /// Courses listing the lost course as a prerequisite.
    pub directly_blocked: Vec<CourseSummary>,
    /// Courses blocked through a chain of prerequisites.
    pub indirectly_blocked: Vec<CourseSummary>,
    /// Courses listing the lost course as a corequisite (not followed further).
    pub corequisite_affected: Vec<CourseSummary>,
    pub total_blocked_courses: usize,
    /// Credits of directly and indirectly blocked courses, each counted once.
    pub total_blocked_credits: u32,
}

/// Simulates losing a course and collects every course it blocks.
///
/// # Algorithm
/// Breadth-first search over the reverse prerequisite graph. The first level
/// is `directly_blocked`; deeper levels are `indirectly_blocked`. Corequisite
/// dependents of the lost course are listed separately and not expanded. A
/// visited set guarantees each course appears once.
///
/// # Errors
/// [`TimetableError::CourseNotFound`] when the code is not in the catalog.
pub fn simulate_course_loss(code: &str, catalog: &Catalog) -> Result<LossSimulation> {
    let code = normalize_code(code);
    let lost = catalog
        .get(&code)
        .ok_or_else(|| TimetableError::CourseNotFound(code.clone()))?;

    let mut prereq_dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut coreq_dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for course in catalog.courses() {
        for p in &course.prerequisites {
            prereq_dependents.entry(p.as_str()).or_default().push(course.code.as_str());
        }
        for c in &course.corequisites {
            coreq_dependents.entry(c.as_str()).or_default().push(course.code.as_str());
        }
    }

    let mut visited: HashSet<String> = HashSet::from([code.clone()]);
    let mut queue = VecDeque::new();
    let mut direct = Vec::new();
    let mut indirect = Vec::new();
    let mut coreq = Vec::new();

    for dep in dependents(&prereq_dependents, &code) {
        if visited.insert(dep.clone()) {
            queue.push_back(dep.clone());
            direct.push(dep);
        }
    }
    for dep in dependents(&coreq_dependents, &code) {
        if visited.insert(dep.clone()) {
            coreq.push(dep);
        }
    }
    while let Some(current) = queue.pop_front() {
        for dep in dependents(&prereq_dependents, &current) {
            if visited.insert(dep.clone()) {
                queue.push_back(dep.clone());
                indirect.push(dep);
            }
        }
    }

    let directly_blocked = summaries(&direct, catalog);
    let indirectly_blocked = summaries(&indirect, catalog);
    let total_blocked_credits = directly_blocked
        .iter()
        .chain(&indirectly_blocked)
        .map(|c| c.credits)
        .fold(0, u32::saturating_add);

    debug!(
        course = %code,
        direct = direct.len(),
        indirect = indirect.len(),
        corequisite = coreq.len(),
        "simulated course loss"
    );

    Ok(LossSimulation {
        lost_course: lost.summary(),
        total_blocked_courses: direct.len() + indirect.len(),
        directly_blocked,
        indirectly_blocked,
        corequisite_affected: summaries(&coreq, catalog),
        total_blocked_credits,
    })
}

fn dependents(map: &HashMap<&str, Vec<&str>>, key: &str) -> Vec<String> {
    map.get(key)
        .map(|codes| codes.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default()
}

/// Summaries of the given codes, sorted by semester then code.
fn summaries(codes: &[String], catalog: &Catalog) -> Vec<CourseSummary> {
    let mut list: Vec<CourseSummary> = codes
        .iter()
        .filter_map(|c| catalog.get(c))
        .map(Course::summary)
        .collect();
    list.sort_by(|a, b| (a.semester, &a.code).cmp(&(b.semester, &b.code)));
    list
}

/// Pending courses up to `semester` whose requirements are satisfied.
pub fn available_courses<'a>(
    semester: u32,
    catalog: &'a Catalog,
    passed: &HashSet<String>,
    enrolled: &HashSet<String>,
) -> Vec<&'a Course> {
    catalog
        .courses()
        .iter()
        .filter(|c| c.semester <= semester && c.status == CourseStatus::Pending)
        .filter(|c| c.is_available(passed, enrolled))
        .collect()
}

/// Recomputes pending/blocked statuses from the catalog's own progress.
///
/// Passed and enrolled sets are taken from course statuses. Pending or
/// blocked courses become `Blocked` when requirements are unmet and
/// `Pending` when they are met. Other statuses are left alone.
///
/// # Returns
/// Number of courses whose status changed.
pub fn refresh_statuses(catalog: &mut Catalog) -> usize {
    let with_status = |status: CourseStatus| -> HashSet<String> {
        catalog
            .courses()
            .iter()
            .filter(|c| c.status == status)
            .map(|c| c.code.clone())
            .collect()
    };
    let passed = with_status(CourseStatus::Passed);
    let enrolled = with_status(CourseStatus::Enrolled);

    let mut changed = 0;
    for course in catalog.courses_mut() {
        if !matches!(course.status, CourseStatus::Pending | CourseStatus::Blocked) {
            continue;
        }
        let next = if course.is_available(&passed, &enrolled) {
            CourseStatus::Pending
        } else {
            CourseStatus::Blocked
        };
        if course.status != next {
            course.status = next;
            changed += 1;
        }
    }
    debug!(changed, "course statuses refreshed");
    changed
}

/// Result of a semester credit-load check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCheck {
    pub allowed: bool,
    pub current_credits: u32,
    pub new_total: u32,
    pub max_credits: u32,
    /// Credits above the cap, 0 when allowed.
    pub excess: u32,
}

/// Checks whether `credits` more fit in `semester` under `max_credits`.
pub fn can_add_to_semester(credits: u32, semester: u32, catalog: &Catalog, max_credits: u32) -> CreditCheck {
    let current_credits = catalog.semester_credits(semester);
    let new_total = current_credits.saturating_add(credits);
    CreditCheck {
        allowed: new_total <= max_credits,
        current_credits,
        new_total,
        max_credits,
        excess: new_total.saturating_sub(max_credits),
    }
}
