//! Data models for `Calendurr`

pub mod course;
pub mod schedule;
pub mod semester;

pub use course::Course;
pub use schedule::{ContainerId, Residency, Schedule, POOL_ALIAS, POOL_ID};
pub use semester::Semester;
