//! Combination generation and schedule metrics.
//!
//! Turns per-course candidate sections plus slot preferences into every
//! conflict-free combination, each annotated with quality metrics.
//!
//! # Algorithm
//!
//! `CombinationGenerator` walks the Cartesian product of section choices in
//! caller order and prunes tuples with internal overlaps or blocked-slot
//! overlaps. The search is exhaustive; cost is bounded by an optional limit,
//! time limit, or cancel flag.
//!
//! # Metrics
//!
//! `compute_metrics` derives free days, gap count and minutes, earliest
//! start, latest end, and preferred-slot usage.

mod conflicts;
mod generator;
mod grid;
mod metrics;

pub use conflicts::{check_blocked_conflicts, check_conflicts, BlockedConflict, ConflictSide, SectionConflict};
pub use generator::{
    generate_combinations, CombinationGenerator, CourseSections, GenerationRequest,
    GenerationResult, StopReason,
};
pub use grid::{schedule_grid, GridCell, GridColumn, ScheduleGrid, GRID_END, GRID_START, GRID_STEP_MINUTES};
pub use metrics::{calculate_metrics, compute_metrics};
