//! Semester planner library for `calendurr`
//!
//! Holds the placement engine that reconciles drag-and-drop moves between the
//! course pool and semesters, the semester lifecycle, progress toward a credit
//! goal, schedule persistence and reports. The CLI is a thin layer on top.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
