//! Schedule model: the course pool plus the ordered semesters

use super::{Course, Semester};
use crate::core::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved container id of the course pool on the wire
pub const POOL_ID: &str = "courses";

/// Alternate spelling accepted for the course pool
pub const POOL_ALIAS: &str = "pool";

/// Identifies a container: the course pool or one semester
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerId {
    /// The pool of unassigned courses
    Pool,
    /// A semester, by id
    Semester(String),
}

impl ContainerId {
    /// Parse a raw container id; the reserved pool ids map to [`ContainerId::Pool`]
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if Self::is_reserved(raw) {
            Self::Pool
        } else {
            Self::Semester(raw.to_string())
        }
    }

    /// Whether an id is reserved for the course pool
    #[must_use]
    pub fn is_reserved(id: &str) -> bool {
        id.eq_ignore_ascii_case(POOL_ID) || id.eq_ignore_ascii_case(POOL_ALIAS)
    }

    /// Wire representation of this container id
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pool => POOL_ID,
            Self::Semester(id) => id,
        }
    }

    /// Semester id, or `None` for the pool
    #[must_use]
    pub fn semester_id(&self) -> Option<&str> {
        match self {
            Self::Pool => None,
            Self::Semester(id) => Some(id),
        }
    }
}

impl From<String> for ContainerId {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => write!(f, "the course pool"),
            Self::Semester(id) => write!(f, "semester '{id}'"),
        }
    }
}

/// Where the references to one course live
///
/// Non-repeatable courses have exactly one owner. A repeatable course keeps its
/// pool copy for as long as it exists and is additionally referenced by zero or
/// more semesters; each of those references is independent of the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Residency {
    /// Single owner (pool or one semester)
    Exclusive(ContainerId),
    /// Pool copy plus the listed semesters, in schedule order
    Shared {
        /// Semesters holding a reference
        semesters: Vec<String>,
    },
}

/// The pool of unassigned courses plus the ordered semesters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Unassigned courses in display order
    #[serde(default, alias = "availableCourses")]
    pub pool: Vec<Course>,

    /// Semesters in display order
    #[serde(default, alias = "buckets")]
    pub semesters: Vec<Semester>,
}

impl Schedule {
    /// Create a schedule from a pool and semesters
    #[must_use]
    pub const fn new(pool: Vec<Course>, semesters: Vec<Semester>) -> Self {
        Self { pool, semesters }
    }

    /// Courses of a container, or `None` if the container does not exist
    #[must_use]
    pub fn courses(&self, container: &ContainerId) -> Option<&[Course]> {
        match container {
            ContainerId::Pool => Some(&self.pool),
            ContainerId::Semester(id) => self.semester(id).map(|s| s.courses.as_slice()),
        }
    }

    /// Mutable course list of a container
    pub fn courses_mut(&mut self, container: &ContainerId) -> Option<&mut Vec<Course>> {
        match container {
            ContainerId::Pool => Some(&mut self.pool),
            ContainerId::Semester(id) => self.semester_mut(id).map(|s| &mut s.courses),
        }
    }

    /// Whether the container exists in this schedule
    #[must_use]
    pub fn contains_container(&self, container: &ContainerId) -> bool {
        self.courses(container).is_some()
    }

    /// Get a semester by id
    #[must_use]
    pub fn semester(&self, id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    /// Get a mutable semester by id
    pub fn semester_mut(&mut self, id: &str) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|s| s.id == id)
    }

    /// Read the course at `index` of a container
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidSourceIndex`] if the container does not
    /// exist or the index is out of bounds.
    pub fn course_at(&self, container: &ContainerId, index: usize) -> Result<&Course, PlannerError> {
        let courses = self.courses(container).unwrap_or_default();
        courses.get(index).ok_or_else(|| PlannerError::InvalidSourceIndex {
            container: container.clone(),
            index,
            len: courses.len(),
        })
    }

    /// Whether the pool holds a course with this id
    #[must_use]
    pub fn pool_contains(&self, course_id: &str) -> bool {
        self.pool.iter().any(|c| c.id == course_id)
    }

    /// Every container holding a reference to the course, pool first
    ///
    /// A container is listed once per reference it holds.
    #[must_use]
    pub fn locations(&self, course_id: &str) -> Vec<ContainerId> {
        let in_pool = self
            .pool
            .iter()
            .filter(|c| c.id == course_id)
            .map(|_| ContainerId::Pool);
        let in_semesters = self.semesters.iter().flat_map(|s| {
            s.courses
                .iter()
                .filter(|c| c.id == course_id)
                .map(|_| ContainerId::Semester(s.id.clone()))
        });
        in_pool.chain(in_semesters).collect()
    }

    /// Where the references to a course live, or `None` if it is nowhere
    #[must_use]
    pub fn residency(&self, course_id: &str) -> Option<Residency> {
        let course = self.find_course(course_id)?;
        if course.repeatable {
            let semesters = self
                .semesters
                .iter()
                .filter(|s| s.contains(course_id))
                .map(|s| s.id.clone())
                .collect();
            Some(Residency::Shared { semesters })
        } else {
            self.locations(course_id)
                .into_iter()
                .next()
                .map(Residency::Exclusive)
        }
    }

    /// Find a course anywhere in the schedule
    #[must_use]
    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.pool
            .iter()
            .chain(self.semesters.iter().flat_map(|s| s.courses.iter()))
            .find(|c| c.id == course_id)
    }

    /// Courses placed in semesters, in schedule order
    pub fn placed_courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    /// Check every schedule invariant
    ///
    /// - semester ids are non-empty, unpadded, unique and never a reserved pool id
    /// - a course id always denotes the same course
    /// - a non-repeatable course is referenced exactly once
    /// - a repeatable course is in the pool exactly once and in each semester at most once
    ///
    /// # Errors
    /// Returns [`PlannerError::Inconsistent`] describing the first violation found.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let mut seen_semesters: Vec<&str> = Vec::with_capacity(self.semesters.len());
        for semester in &self.semesters {
            if semester.id.is_empty() || semester.id.trim() != semester.id {
                return Err(PlannerError::Inconsistent(format!(
                    "semester id '{}' is empty or padded with whitespace",
                    semester.id
                )));
            }
            if ContainerId::is_reserved(&semester.id) {
                return Err(PlannerError::Inconsistent(format!(
                    "semester id '{}' is reserved for the course pool",
                    semester.id
                )));
            }
            if seen_semesters.contains(&semester.id.as_str()) {
                return Err(PlannerError::Inconsistent(format!(
                    "duplicate semester id '{}'",
                    semester.id
                )));
            }
            seen_semesters.push(&semester.id);
        }

        let mut references: BTreeMap<&str, Vec<(ContainerId, &Course)>> = BTreeMap::new();
        for course in &self.pool {
            references
                .entry(course.id.as_str())
                .or_default()
                .push((ContainerId::Pool, course));
        }
        for semester in &self.semesters {
            for course in &semester.courses {
                references
                    .entry(course.id.as_str())
                    .or_default()
                    .push((ContainerId::Semester(semester.id.clone()), course));
            }
        }

        for (id, refs) in &references {
            let first = refs[0].1;
            if refs.iter().any(|(_, c)| *c != first) {
                return Err(PlannerError::Inconsistent(format!(
                    "course '{id}' has conflicting definitions"
                )));
            }

            if !first.repeatable {
                if refs.len() > 1 {
                    return Err(PlannerError::Inconsistent(format!(
                        "course '{id}' is held by {} containers",
                        refs.len()
                    )));
                }
                continue;
            }

            let pool_copies = refs.iter().filter(|(c, _)| *c == ContainerId::Pool).count();
            if pool_copies != 1 {
                return Err(PlannerError::Inconsistent(format!(
                    "repeatable course '{id}' has {pool_copies} pool copies"
                )));
            }
            let mut holders: Vec<&ContainerId> = refs.iter().map(|(c, _)| c).collect();
            holders.sort();
            if holders.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(PlannerError::Inconsistent(format!(
                    "repeatable course '{id}' is placed twice in one semester"
                )));
            }
        }

        Ok(())
    }
}
