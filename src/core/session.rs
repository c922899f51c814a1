//! Editing sessions
//!
//! A session owns one schedule document and changes it only by reducing
//! actions over the current value; there is no other mutable state.

use crate::core::error::Result;
use crate::core::lifecycle::{create_semester, remove_semester};
use crate::core::models::Schedule;
use crate::core::placement::{apply_move, MoveRequest};
use crate::core::progress::{compute_progress, Progress};
use crate::core::store::ScheduleDocument;

/// Something a user can do to a schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move a course between (or within) containers
    Move(MoveRequest),
    /// Append a new semester
    AddSemester {
        /// Display name
        name: String,
    },
    /// Remove an empty, unlocked semester
    RemoveSemester {
        /// Semester id
        id: String,
    },
}

/// Apply one action to a schedule, returning the new schedule
///
/// # Errors
/// Propagates the guard failures of the placement engine and the semester
/// lifecycle; the input schedule is untouched in that case.
pub fn reduce(schedule: &Schedule, action: &Action) -> Result<Schedule> {
    match action {
        Action::Move(request) => apply_move(schedule, request),
        Action::AddSemester { name } => Ok(create_semester(schedule, name)),
        Action::RemoveSemester { id } => remove_semester(schedule, id),
    }
}

/// One editing session over a schedule document
#[derive(Debug, Clone)]
pub struct Session {
    document: ScheduleDocument,
    goal: f32,
    dirty: bool,
}

impl Session {
    /// Start a session; `goal` is the positive credit goal used for progress
    #[must_use]
    pub const fn new(document: ScheduleDocument, goal: f32) -> Self {
        Self {
            document,
            goal,
            dirty: false,
        }
    }

    /// Apply an action, replacing the schedule on success
    ///
    /// # Errors
    /// Returns the guard failure; the session is unchanged in that case.
    pub fn dispatch(&mut self, action: &Action) -> Result<()> {
        let next = reduce(&self.document.schedule, action)?;
        if next != self.document.schedule {
            self.document.schedule = next;
            self.dirty = true;
        }
        Ok(())
    }

    /// Current schedule
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.document.schedule
    }

    /// Current document
    #[must_use]
    pub const fn document(&self) -> &ScheduleDocument {
        &self.document
    }

    /// Whether there are changes since the session started or was last marked saved
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the current document has been persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Progress of the current schedule toward the session goal
    #[must_use]
    pub fn progress(&self) -> Progress {
        compute_progress(&self.document.schedule, self.goal)
    }

    /// End the session, handing back the document
    #[must_use]
    pub fn into_document(self) -> ScheduleDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlannerError;
    use crate::core::models::{Course, Semester};
    use crate::core::placement::Slot;

    fn session() -> Session {
        let schedule = Schedule::new(
            vec![Course::new("cop3530", "COP 3530", "Data Structures and Algorithm", 3.0)],
            vec![Semester::new("fall-2025", "Fall 2025")],
        );
        Session::new(ScheduleDocument::new("Plan A", schedule), 120.0)
    }

    #[test]
    fn test_dispatch_move_marks_dirty() {
        let mut session = session();
        session
            .dispatch(&Action::Move(MoveRequest::new(Slot::pool(0), Slot::semester("fall-2025", 0))))
            .unwrap();

        assert!(session.is_dirty());
        assert!(session.schedule().pool.is_empty());
        assert!((session.progress().total_credits - 3.0).abs() < f32::EPSILON);
        assert_eq!(session.progress().percentage, 2);
    }

    #[test]
    fn test_noop_does_not_mark_dirty() {
        let mut session = session();
        session
            .dispatch(&Action::Move(MoveRequest::dropped_outside(Slot::pool(0))))
            .unwrap();

        assert!(!session.is_dirty());
    }

    #[test]
    fn test_failed_action_leaves_session_unchanged() {
        let mut session = session();
        let before = session.schedule().clone();

        let err = session
            .dispatch(&Action::RemoveSemester { id: "spring-2026".to_string() })
            .unwrap_err();

        assert_eq!(err, PlannerError::UnknownSemester("spring-2026".to_string()));
        assert_eq!(session.schedule(), &before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_add_then_remove_semester() {
        let mut session = session();
        session
            .dispatch(&Action::AddSemester { name: "Spring 2026".to_string() })
            .unwrap();
        assert_eq!(session.schedule().semesters.len(), 2);

        session
            .dispatch(&Action::RemoveSemester { id: "spring-2026".to_string() })
            .unwrap();
        assert_eq!(session.schedule().semesters.len(), 1);

        session.mark_saved();
        assert!(!session.is_dirty());
        assert_eq!(session.into_document().name, "Plan A");
    }
}
