//! Semester lifecycle: creation, guarded removal, and the acquired-credits semester

use crate::core::error::{PlannerError, Result};
use crate::core::models::{ContainerId, Schedule, Semester};
use crate::{debug, info};

/// Id of the locked semester holding credits earned before planning started
pub const ACQUIRED_CREDITS_ID: &str = "acquired-credits";

/// Append a new empty, unlocked semester named `name`
///
/// Names need not be unique; the id is derived from the name and made unique.
#[must_use]
pub fn create_semester(schedule: &Schedule, name: &str) -> Schedule {
    let id = next_semester_id(schedule, name);
    debug!("Creating semester '{id}' ({name})");

    let mut next = schedule.clone();
    next.semesters.push(Semester::new(id, name.trim()));
    next
}

/// Remove a semester
///
/// # Errors
/// - [`PlannerError::UnknownSemester`] if no semester has this id
/// - [`PlannerError::LockedBucket`] if the semester is locked, empty or not
/// - [`PlannerError::NonEmptyBucket`] if it still holds courses
pub fn remove_semester(schedule: &Schedule, id: &str) -> Result<Schedule> {
    let position = schedule
        .semesters
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| PlannerError::UnknownSemester(id.to_string()))?;

    let semester = &schedule.semesters[position];
    if semester.is_locked {
        return Err(PlannerError::LockedBucket(id.to_string()));
    }
    if !semester.is_empty() {
        return Err(PlannerError::NonEmptyBucket(id.to_string()));
    }

    info!("Removing semester '{id}'");
    let mut next = schedule.clone();
    next.semesters.remove(position);
    Ok(next)
}

/// Insert the locked acquired-credits semester at the front of the schedule
///
/// Does nothing if the schedule already has a locked semester.
#[must_use]
pub fn with_acquired_credits(schedule: &Schedule, name: &str) -> Schedule {
    let mut next = schedule.clone();
    if next.semesters.iter().any(|s| s.is_locked) {
        return next;
    }

    let mut acquired = Semester::new(next_semester_id(schedule, ACQUIRED_CREDITS_ID), name);
    acquired.is_locked = true;
    next.semesters.insert(0, acquired);
    next
}

/// Derive a fresh semester id from a display name
///
/// Lowercase alphanumeric runs joined by `-` ("Fall 2027" becomes "fall-2027"),
/// suffixed `-2`, `-3`, ... while the id is taken or reserved for the pool.
#[must_use]
pub fn next_semester_id(schedule: &Schedule, name: &str) -> String {
    let base = slugify(name);
    let base = if base.is_empty() {
        "semester".to_string()
    } else {
        base
    };

    let taken = |id: &str| ContainerId::is_reserved(id) || schedule.semester(id).is_some();
    if !taken(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Lowercase alphanumeric runs joined by `-`
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;

    #[test]
    fn test_create_semester() {
        let schedule = create_semester(&Schedule::default(), "Fall 2027");

        assert_eq!(schedule.semesters.len(), 1);
        let semester = &schedule.semesters[0];
        assert_eq!(semester.id, "fall-2027");
        assert_eq!(semester.name, "Fall 2027");
        assert!(!semester.is_locked);
        assert!(semester.is_empty());
    }

    #[test]
    fn test_create_semester_with_duplicate_name() {
        let once = create_semester(&Schedule::default(), "Fall 2027");
        let twice = create_semester(&once, "Fall 2027");
        let thrice = create_semester(&twice, "fall-2027");

        let ids: Vec<&str> = thrice.semesters.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["fall-2027", "fall-2027-2", "fall-2027-3"]);
    }

    #[test]
    fn test_create_semester_avoids_reserved_ids() {
        let schedule = create_semester(&Schedule::default(), "Courses");
        assert_eq!(schedule.semesters[0].id, "courses-2");

        let unnamed = create_semester(&Schedule::default(), "  ");
        assert_eq!(unnamed.semesters[0].id, "semester");
    }

    #[test]
    fn test_remove_empty_semester_preserves_order() {
        let mut schedule = Schedule::default();
        for name in ["Fall", "Spring", "Summer"] {
            schedule = create_semester(&schedule, name);
        }

        let next = remove_semester(&schedule, "spring").unwrap();
        let ids: Vec<&str> = next.semesters.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["fall", "summer"]);
    }

    #[test]
    fn test_remove_non_empty_semester_fails() {
        let mut schedule = create_semester(&Schedule::default(), "Fall");
        schedule.semesters[0]
            .courses
            .push(Course::new("cda3101", "CDA 3101", "Computer Organization", 3.0));

        assert_eq!(
            remove_semester(&schedule, "fall"),
            Err(PlannerError::NonEmptyBucket("fall".to_string()))
        );
    }

    #[test]
    fn test_remove_locked_semester_fails_even_when_empty() {
        let schedule = with_acquired_credits(&Schedule::default(), "Acquired Credits");

        assert_eq!(
            remove_semester(&schedule, ACQUIRED_CREDITS_ID),
            Err(PlannerError::LockedBucket(ACQUIRED_CREDITS_ID.to_string()))
        );
    }

    #[test]
    fn test_remove_unknown_semester() {
        assert_eq!(
            remove_semester(&Schedule::default(), "fall"),
            Err(PlannerError::UnknownSemester("fall".to_string()))
        );
    }

    #[test]
    fn test_acquired_credits_inserted_once_at_front() {
        let schedule = create_semester(&Schedule::default(), "Fall 2024");
        let seeded = with_acquired_credits(&schedule, "Acquired Credits");
        let again = with_acquired_credits(&seeded, "Acquired Credits");

        assert_eq!(again.semesters.len(), 2);
        assert_eq!(again.semesters[0].id, ACQUIRED_CREDITS_ID);
        assert!(again.semesters[0].is_locked);
        assert_eq!(again.semesters[1].id, "fall-2024");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Summer 2026 (Co-op)"), "summer-2026-co-op");
        assert_eq!(slugify("---"), "");
    }
}
