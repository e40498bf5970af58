//! Course timetable engine.
//!
//! Builds every conflict-free weekly timetable from candidate class
//! sections, scores and ranks them, and keeps a program's course catalog
//! consistent with its prerequisite graph.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeBlock`, `ClassSection`, `SlotPreference`,
//!   `ScheduleCombination`, `Course`, `Catalog`
//! - **`scheduler`**: Combination generator, metrics, conflict reports, grid view
//! - **`ranking`**: Filter/sort engine and named presets
//! - **`catalog`**: Prerequisite graph validation, planning queries, course CRUD
//! - **`validation`**: Validation reports and raw section input checks
//! - **`config`**: TOML-loadable engine settings
//!
//! # Architecture
//!
//! Every operation is synchronous and works on caller-owned data; nothing is
//! shared between calls. Generation is the only potentially long-running
//! operation and can be bounded by a limit, a time limit, or a cancel flag.
//! The crate emits `tracing` events but installs no subscriber.
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22 (BFS, topological sort)

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
