//! Course catalog integrity and planning.
//!
//! Courses reference each other through prerequisite and corequisite codes.
//! Both kinds of reference are edges from requirement to dependent in one
//! directed graph, which must be acyclic.
//!
//! # Operations
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`validate_structure`] | References, semester order, cycles |
//! | [`can_move_to_semester`] | Ordering rules for a semester change |
//! | [`simulate_course_loss`] | Courses blocked by failing one course |
//! | [`available_courses`] | Courses whose requirements are met |
//! | [`refresh_statuses`] | Pending/blocked status recomputation |
//! | [`can_add_to_semester`] | Semester credit cap check |
//! | [`create_course`] / [`update_course`] / [`delete_course`] | Guarded mutation |
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks", CACM 5(11)

mod crud;
mod graph;
mod planning;

pub use crud::{create_course, delete_course, update_course, CourseUpdate};
pub use graph::{detect_cycle, validate_structure, CYCLE_WITNESS_LEN};
pub use planning::{
    available_courses, can_add_to_semester, can_move_to_semester, refresh_statuses,
    simulate_course_loss, CreditCheck, LossSimulation, MoveCheck,
};
