//! Semester model

use super::Course;
use serde::{Deserialize, Serialize};

/// A named, ordered container of courses representing one planning period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Identifier, unique within a schedule (e.g., "fall-2024")
    pub id: String,

    /// Display name (e.g., "Fall 2024")
    pub name: String,

    /// Set only on the acquired-credits semester; locked semesters cannot be removed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_locked: bool,

    /// Courses in display order
    #[serde(default, alias = "items")]
    pub courses: Vec<Course>,
}

impl Semester {
    /// Create a new empty, unlocked semester
    ///
    /// # Arguments
    /// * `id` - Identifier unique within the schedule
    /// * `name` - Display name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_locked: false,
            courses: Vec::new(),
        }
    }

    /// Builder-style course append, used when seeding schedules
    #[must_use]
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Total credit hours of the courses in this semester
    #[must_use]
    pub fn credits(&self) -> f32 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    /// Whether the semester holds a course with this id
    #[must_use]
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }

    /// Whether the semester holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
