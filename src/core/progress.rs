//! Progress toward the credit goal

use crate::core::models::Schedule;
use std::collections::BTreeMap;

/// Credits placed in semesters measured against a goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Sum of credits over every course held by a semester
    pub total_credits: f32,
    /// `min(100, floor(total / goal * 100))`
    pub percentage: u8,
    /// Credits required
    pub goal: f32,
}

impl Progress {
    /// Credits still needed to reach the goal (never negative)
    #[must_use]
    pub fn remaining_credits(&self) -> f32 {
        (self.goal - self.total_credits).max(0.0)
    }

    /// Whether the goal has been reached
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_credits >= self.goal
    }
}

/// Credit load of one semester
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterLoad {
    /// Semester id
    pub id: String,
    /// Semester display name
    pub name: String,
    /// Total credits
    pub credits: f32,
    /// Number of courses
    pub course_count: usize,
    /// Whether this is the locked acquired-credits semester
    pub locked: bool,
}

/// Compute progress toward `goal`
///
/// Pool courses are not counted. `goal` must be positive.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_progress(schedule: &Schedule, goal: f32) -> Progress {
    let total_credits: f32 = schedule.placed_courses().map(|c| c.credits).sum();
    let percentage = (f64::from(total_credits) * 100.0 / f64::from(goal))
        .floor()
        .clamp(0.0, 100.0) as u8;

    Progress {
        total_credits,
        percentage,
        goal,
    }
}

/// Credit load of every semester, in schedule order
#[must_use]
pub fn semester_loads(schedule: &Schedule) -> Vec<SemesterLoad> {
    schedule
        .semesters
        .iter()
        .map(|s| SemesterLoad {
            id: s.id.clone(),
            name: s.name.clone(),
            credits: s.credits(),
            course_count: s.courses.len(),
            locked: s.is_locked,
        })
        .collect()
}

/// Placed credits per category tag; untagged courses are not counted
#[must_use]
pub fn credits_by_type(schedule: &Schedule) -> BTreeMap<String, f32> {
    let mut totals = BTreeMap::new();
    for course in schedule.placed_courses() {
        for tag in &course.types {
            *totals.entry(tag.clone()).or_insert(0.0) += course.credits;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Semester};

    fn schedule() -> Schedule {
        Schedule::new(
            vec![Course::new("pool", "POOL 1", "Unplaced", 30.0)],
            vec![
                Semester::new("fall", "Fall")
                    .with_course(Course::new("a", "A 1", "A", 3.0).with_type("core"))
                    .with_course(Course::new("b", "B 1", "B", 4.0).with_type("core").with_type("critical_tracking")),
                Semester::new("spring", "Spring").with_course(Course::new("c", "C 1", "C", 3.0).with_type("elective")),
            ],
        )
    }

    #[test]
    fn test_goal_reached() {
        let progress = compute_progress(&schedule(), 10.0);

        assert!((progress.total_credits - 10.0).abs() < f32::EPSILON);
        assert_eq!(progress.percentage, 100);
        assert!(progress.is_complete());
        assert!(progress.remaining_credits().abs() < f32::EPSILON);
    }

    #[test]
    fn test_percentage_is_floored() {
        let progress = compute_progress(&schedule(), 120.0);

        assert_eq!(progress.percentage, 8);
        assert!((progress.remaining_credits() - 110.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_percentage_of_53_out_of_100() {
        let schedule = Schedule::new(
            Vec::new(),
            vec![Semester::new("fall", "Fall").with_course(Course::new("a", "A 1", "A", 53.0))],
        );
        assert_eq!(compute_progress(&schedule, 100.0).percentage, 53);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_percentage_is_exact_for_whole_credits() {
        for goal in 1..=200_u32 {
            for total in 0..=goal {
                let schedule = Schedule::new(
                    Vec::new(),
                    vec![Semester::new("fall", "Fall").with_course(Course::new("a", "A 1", "A", total as f32))],
                );
                let progress = compute_progress(&schedule, goal as f32);

                assert_eq!(
                    u32::from(progress.percentage),
                    total * 100 / goal,
                    "{total} credits against a goal of {goal}"
                );
            }
        }
    }

    #[test]
    fn test_percentage_caps_at_100() {
        assert_eq!(compute_progress(&schedule(), 5.0).percentage, 100);
    }

    #[test]
    fn test_empty_schedule() {
        let progress = compute_progress(&Schedule::default(), 120.0);
        assert_eq!(progress.percentage, 0);
        assert!(progress.total_credits.abs() < f32::EPSILON);
    }

    #[test]
    fn test_semester_loads() {
        let loads = semester_loads(&schedule());

        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].id, "fall");
        assert!((loads[0].credits - 7.0).abs() < f32::EPSILON);
        assert_eq!(loads[0].course_count, 2);
        assert!(!loads[1].locked);
    }

    #[test]
    fn test_credits_by_type() {
        let totals = credits_by_type(&schedule());

        assert!((totals["core"] - 7.0).abs() < f32::EPSILON);
        assert!((totals["critical_tracking"] - 4.0).abs() < f32::EPSILON);
        assert!((totals["elective"] - 3.0).abs() < f32::EPSILON);
    }
}
