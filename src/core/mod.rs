//! Planner core: schedule model, placement engine, semester lifecycle,
//! progress, persistence and reports

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod placement;
pub mod progress;
pub mod report;
pub mod session;
pub mod store;

/// Returns the current version of the `calendurr` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
