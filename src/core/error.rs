//! Planner and storage errors.

use crate::core::models::ContainerId;
use thiserror::Error;

/// Errors raised by placement and semester lifecycle operations
///
/// None of these are retried: every operation is pure, so callers fix the
/// precondition (e.g. empty the semester) and issue the request again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The move named a source slot that holds no course
    #[error("no course at index {index} of {container} ({len} courses)")]
    InvalidSourceIndex {
        /// Source container of the move
        container: ContainerId,
        /// Requested index
        index: usize,
        /// Number of courses in the container
        len: usize,
    },

    /// The move named a drop target that does not exist; the course goes back to the pool
    #[error("unknown drop target '{0}', returning the course to the pool")]
    UnknownDestination(String),

    /// Semester still holds courses and cannot be removed
    #[error("semester '{0}' still holds courses; move them out before removing it")]
    NonEmptyBucket(String),

    /// Semester holds acquired credits and cannot be removed
    #[error("semester '{0}' holds acquired credits and cannot be removed")]
    LockedBucket(String),

    /// No semester with this id
    #[error("semester '{0}' not found")]
    UnknownSemester(String),

    /// A repeatable course was dropped into a semester that already holds it
    #[error("course '{course}' is already placed in semester '{semester}'")]
    AlreadyPlaced {
        /// Course id
        course: String,
        /// Semester id
        semester: String,
    },

    /// A schedule violates an invariant
    #[error("inconsistent schedule: {0}")]
    Inconsistent(String),
}

/// Errors raised while loading or saving schedules and catalogs
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write a file
    #[error("Failed to read/write schedule file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize a JSON schedule document
    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a TOML catalog
    #[error("Invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The stored schedule breaks a planner invariant
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// No schedule stored under this name
    #[error("Schedule '{0}' not found")]
    NotFound(String),

    /// A catalog lists the same course id twice
    #[error("Catalog lists course '{0}' more than once")]
    DuplicateCourse(String),
}

/// Result alias for planner operations
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
