//! Placement engine
//!
//! Applies one pick-and-place move to a schedule and returns the new schedule.
//! The input schedule is never modified; a rejected move leaves nothing to undo.
//!
//! Transfer rules:
//! - a move dropped outside every container, or onto its own slot, is a no-op
//! - dragging a repeatable course from the pool into a semester places a new
//!   reference and leaves the pool copy where it is
//! - every other move detaches the course from its source first and then
//!   inserts it at the destination index, measured against the post-removal
//!   sequence and clamped to its length
//! - dropping a repeatable course's semester reference onto the pool only drops
//!   that reference, since the pool already holds the course
//! - a drop onto an unknown container sends the course back to the end of the pool

use crate::core::error::{PlannerError, Result};
use crate::core::models::{ContainerId, Course, Schedule};
use crate::{debug, warn};
use serde::Deserialize;

/// A position inside a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Container holding the position
    pub container: ContainerId,
    /// Index within the container's course sequence
    pub index: usize,
}

impl Slot {
    /// Create a slot
    #[must_use]
    pub const fn new(container: ContainerId, index: usize) -> Self {
        Self { container, index }
    }

    /// A slot in the course pool
    #[must_use]
    pub const fn pool(index: usize) -> Self {
        Self::new(ContainerId::Pool, index)
    }

    /// A slot in a semester
    #[must_use]
    pub fn semester(id: impl Into<String>, index: usize) -> Self {
        Self::new(ContainerId::Semester(id.into()), index)
    }
}

/// A typed pick-and-place gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Where the course was picked up
    pub source: Slot,
    /// Where it was dropped; `None` when dropped outside every container
    pub destination: Option<Slot>,
}

impl MoveRequest {
    /// Move from `source` to `destination`
    #[must_use]
    pub const fn new(source: Slot, destination: Slot) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A gesture that ended outside every container
    #[must_use]
    pub const fn dropped_outside(source: Slot) -> Self {
        Self {
            source,
            destination: None,
        }
    }

    /// Convert a raw drag result (JSON) into a typed request
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a drag result.
    pub fn from_gesture_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<DropEvent>(json).map(Self::from)
    }
}

/// Raw drag result as emitted by a drag-and-drop UI
///
/// `{ "source": {"droppableId", "index"}, "destination": {...} | null }`
#[derive(Debug, Clone, Deserialize)]
pub struct DropEvent {
    /// Where the drag started
    pub source: DropLocation,
    /// Where it ended, if over a droppable area
    #[serde(default)]
    pub destination: Option<DropLocation>,
}

/// One end of a raw drag result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    /// Container id as known to the UI (`courses` for the pool)
    pub droppable_id: String,
    /// Index inside the container
    pub index: usize,
}

impl From<DropLocation> for Slot {
    fn from(location: DropLocation) -> Self {
        Self::new(ContainerId::parse(&location.droppable_id), location.index)
    }
}

impl From<DropEvent> for MoveRequest {
    fn from(event: DropEvent) -> Self {
        Self {
            source: event.source.into(),
            destination: event.destination.map(Slot::from),
        }
    }
}

/// Apply a move to a schedule
///
/// # Errors
/// - [`PlannerError::InvalidSourceIndex`] if the source slot holds no course
/// - [`PlannerError::AlreadyPlaced`] if a repeatable course is dropped into a
///   semester that already holds it
pub fn apply_move(schedule: &Schedule, request: &MoveRequest) -> Result<Schedule> {
    let Some(destination) = &request.destination else {
        debug!("Course dropped outside any container; schedule unchanged");
        return Ok(schedule.clone());
    };
    let source = &request.source;

    if source == destination {
        debug!("Course dropped onto its own slot; schedule unchanged");
        return Ok(schedule.clone());
    }

    let course = schedule.course_at(&source.container, source.index)?.clone();

    if !schedule.contains_container(&destination.container) {
        warn!(
            "{}",
            PlannerError::UnknownDestination(destination.container.as_str().to_string())
        );
        return Ok(return_to_pool(schedule, source, course));
    }

    if let Some(semester_id) = destination.container.semester_id() {
        let already_there = destination.container != source.container
            && schedule
                .semester(semester_id)
                .is_some_and(|s| s.contains(&course.id));
        if already_there {
            return Err(PlannerError::AlreadyPlaced {
                course: course.id,
                semester: semester_id.to_string(),
            });
        }
    }

    let mut next = schedule.clone();
    if keeps_source_reference(source, destination, &course) {
        debug!(
            "Placing repeatable '{}' into {} and keeping its pool copy",
            course.id, destination.container
        );
    } else {
        detach(&mut next, source);
    }
    debug!(
        "Moving '{}' from {}[{}] to {}[{}]",
        course.id, source.container, source.index, destination.container, destination.index
    );
    attach(&mut next, destination, course);

    Ok(next)
}

/// Pool to semester moves of repeatable courses place a reference instead of moving
fn keeps_source_reference(source: &Slot, destination: &Slot, course: &Course) -> bool {
    course.repeatable && source.container == ContainerId::Pool && destination.container != ContainerId::Pool
}

fn detach(schedule: &mut Schedule, slot: &Slot) {
    if let Some(courses) = schedule.courses_mut(&slot.container) {
        if slot.index < courses.len() {
            courses.remove(slot.index);
        }
    }
}

fn attach(schedule: &mut Schedule, slot: &Slot, course: Course) {
    if slot.container == ContainerId::Pool && course.repeatable && schedule.pool_contains(&course.id) {
        debug!("'{}' already has a pool copy; dropping the semester reference", course.id);
        return;
    }
    if let Some(courses) = schedule.courses_mut(&slot.container) {
        let at = slot.index.min(courses.len());
        courses.insert(at, course);
    }
}

/// Fallback for drops onto an unknown container: the course must not be lost
fn return_to_pool(schedule: &Schedule, source: &Slot, course: Course) -> Schedule {
    let mut next = schedule.clone();
    if source.container == ContainerId::Pool && course.repeatable {
        return next;
    }
    detach(&mut next, source);
    let end = next.pool.len();
    attach(&mut next, &Slot::pool(end), course);
    next
}
