//! Course catalogs: TOML catalog files and the built-in model plan
//!
//! A catalog file lists courses as `[[course]]` tables:
//!
//! ```toml
//! [[course]]
//! id = "cop3502c"
//! code = "COP 3502C"
//! name = "Programming Fundamentals 1"
//! credits = 4
//! types = ["core", "critical_tracking"]
//!
//! [[course]]
//! id = "internship"
//! code = "Internship/Co-op"
//! name = "Pursue if desired"
//! credits = 0
//! repeatable = true
//! ```

use crate::core::error::StoreError;
use crate::core::lifecycle::slugify;
use crate::core::models::{Course, Schedule, Semester};
use crate::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "course")]
    courses: Vec<Course>,
}

/// Parse a TOML catalog into pool order
///
/// # Errors
/// Returns an error if the TOML is malformed or lists a course id twice.
pub fn parse_catalog(toml_str: &str) -> Result<Vec<Course>, StoreError> {
    let catalog: CatalogFile = toml::from_str(toml_str)?;

    let mut seen = HashSet::new();
    for course in &catalog.courses {
        if !seen.insert(course.id.as_str()) {
            return Err(StoreError::DuplicateCourse(course.id.clone()));
        }
    }

    debug!("Parsed catalog with {} courses", catalog.courses.len());
    Ok(catalog.courses)
}

/// Load a TOML catalog file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, StoreError> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

fn course(id: &str, code: &str, name: &str, credits: f32, types: &[&str]) -> Course {
    types
        .iter()
        .fold(Course::new(id, code, name, credits), |c, tag| c.with_type(*tag))
}

fn semester(name: &str, courses: Vec<Course>) -> Semester {
    let mut semester = Semester::new(slugify(name), name);
    semester.courses = courses;
    semester
}

/// The reference eight-semester computer science track
///
/// Courses offered with a credit range are listed at the low end of the range.
#[must_use]
pub fn model_plan() -> Vec<Semester> {
    vec![
        semester(
            "Fall 2024",
            vec![
                course("q1", "Quest 1", "Gen Ed Humanities", 3.0, &["gen_ed"]),
                course("cop3502c", "COP 3502C", "Programming Fundamentals 1", 4.0, &["core", "critical_tracking"]),
                course("mac2311", "MAC 2311", "Analytic Geometry and Calculus 1", 4.0, &["core", "critical_tracking"]),
                course("composition", "Composition", "State Core Gen Ed Composition; Writing", 3.0, &["gen_ed"]),
            ],
        ),
        semester(
            "Spring 2025",
            vec![
                course("cop3503c", "COP 3503C", "Programming Fundamentals 2", 4.0, &["core", "critical_tracking"]),
                course("cot3100", "COT 3100", "Applications of Discrete Structures", 3.0, &["core"]),
                course("mac2312", "MAC 2312", "Analytic Geometry and Calculus 2", 4.0, &["core", "critical_tracking"]),
                course("phy1", "PHY 2048 / 2053 + Lab", "Physics 1 w/ Lab (Select one)", 4.0, &["core"]),
            ],
        ),
        semester(
            "Summer 2025",
            vec![
                course("bio", "Biological Sciences", "State Core Gen Ed", 3.0, &["gen_ed"]),
                course("sbs1", "Social & Behavioral Sciences", "State Core Gen Ed", 3.0, &["gen_ed"]),
                course("hum2", "Humanities", "Gen Ed", 3.0, &["gen_ed"]),
            ],
        ),
        semester(
            "Fall 2025",
            vec![
                course("cda3101", "CDA 3101", "Intro to Computer Organization", 3.0, &["core"]),
                course("cop3530", "COP 3530", "Data Structures and Algorithm", 3.0, &["core"]),
                course("mac2313", "MAC 2313", "Analytic Geometry and Calculus 3", 4.0, &["core"]),
                course("phy2", "PHY 2049 / 2054 + Lab", "Physics 2 w/ Lab (Select one)", 4.0, &["core"]),
            ],
        ),
        semester(
            "Spring 2026",
            vec![
                course("q2", "Quest 2", "Gen Ed Bio/Social & Behavioral Sci", 3.0, &["gen_ed"]),
                course("cen3031", "CEN 3031", "Intro to Software Engineering", 3.0, &["core"]),
                course("cis4301", "CIS 4301", "Information and Database Systems 1", 3.0, &["core"]),
                course("enc3246", "ENC 3246", "Professional Communication for Engineers", 3.0, &["core"]),
                course("mas", "MAS 3114 / 4105", "Computational or Linear Algebra", 3.0, &["core"]),
            ],
        ),
        semester(
            "Summer 2026",
            vec![course("internship", "Internship/Co-op", "Pursue if desired", 0.0, &[]).repeatable()],
        ),
        semester(
            "Fall 2026",
            vec![
                course("sbs2", "SBS or Bio", "Gen Ed Area not taken in Q2", 3.0, &["gen_ed"]),
                course("hum3", "Humanities", "Gen Ed", 3.0, &["gen_ed"]),
                course("teche1", "Technical Elective", "", 3.0, &["elective"]),
                course("teche2", "Technical Elective", "", 3.0, &["elective"]),
                course("lang1", "Foreign Language / Elective", "If 4-3-3 path", 3.0, &["elective"]),
            ],
        ),
        semester(
            "Spring 2027",
            vec![
                course("cis4914", "CIS 4914", "Senior Project", 3.0, &["core"]),
                course("teche3", "Technical Elective", "", 3.0, &["elective"]),
                course("elec1", "Elective", "", 3.0, &["elective"]),
                course("elec2", "Elective", "", 4.0, &["elective"]),
            ],
        ),
    ]
}

/// Every course of the model plan, unplaced, in plan order
#[must_use]
pub fn model_catalog() -> Vec<Course> {
    model_plan()
        .into_iter()
        .flat_map(|s| s.courses)
        .collect()
}

/// The model plan fully placed; only repeatable courses keep a pool copy
#[must_use]
pub fn model_schedule() -> Schedule {
    let semesters = model_plan();
    let pool = semesters
        .iter()
        .flat_map(|s| s.courses.iter())
        .filter(|c| c.repeatable)
        .cloned()
        .collect();
    Schedule::new(pool, semesters)
}
