//! Schedule reports
//!
//! Renders a schedule document, its semester loads and its progress toward the
//! credit goal as Markdown or self-contained HTML.

pub mod formats;

use crate::core::models::Course;
use crate::core::progress::{compute_progress, credits_by_type, semester_loads, Progress};
use crate::core::store::ScheduleDocument;
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Document being reported
    pub document: &'a ScheduleDocument,
    /// Progress of the document's schedule toward the goal
    pub progress: Progress,
}

impl<'a> ReportContext<'a> {
    /// Create a report context measuring progress against `goal`
    #[must_use]
    pub fn new(document: &'a ScheduleDocument, goal: f32) -> Self {
        Self {
            document,
            progress: compute_progress(&document.schedule, goal),
        }
    }

    /// "current - graduating" semester span, or whichever half is known
    #[must_use]
    pub fn span(&self) -> String {
        let current = self.document.current_semester.trim();
        let graduating = self.document.graduating_semester.trim();
        match (current.is_empty(), graduating.is_empty()) {
            (false, false) => format!("{current} - {graduating}"),
            (false, true) => current.to_string(),
            (true, false) => format!("until {graduating}"),
            (true, true) => String::new(),
        }
    }

    /// Flatten the context into template-ready strings
    #[must_use]
    pub fn view(&self) -> ReportView {
        let schedule = &self.document.schedule;
        let semesters = schedule
            .semesters
            .iter()
            .zip(semester_loads(schedule))
            .map(|(semester, load)| SemesterView {
                name: semester.name.clone(),
                locked: load.locked,
                credits: format_credits(load.credits),
                courses: semester.courses.iter().map(CourseRow::from).collect(),
            })
            .collect();

        ReportView {
            title: self.document.name.clone(),
            major: self.document.major.clone(),
            span: self.span(),
            total_credits: format_credits(self.progress.total_credits),
            goal: format_credits(self.progress.goal),
            percentage: self.progress.percentage,
            remaining: format_credits(self.progress.remaining_credits()),
            semesters,
            pool: schedule.pool.iter().map(CourseRow::from).collect(),
            by_type: credits_by_type(schedule)
                .into_iter()
                .map(|(tag, credits)| TypeTotal {
                    tag: tag.replace('_', " "),
                    credits: format_credits(credits),
                })
                .collect(),
        }
    }
}

/// Template-ready report data
#[derive(Debug, Clone)]
pub struct ReportView {
    /// Schedule name
    pub title: String,
    /// Major, possibly empty
    pub major: String,
    /// Planned semester span, possibly empty
    pub span: String,
    /// Placed credits
    pub total_credits: String,
    /// Credit goal
    pub goal: String,
    /// Progress percentage
    pub percentage: u8,
    /// Credits still needed
    pub remaining: String,
    /// Semesters in order
    pub semesters: Vec<SemesterView>,
    /// Unassigned courses
    pub pool: Vec<CourseRow>,
    /// Placed credits per category tag
    pub by_type: Vec<TypeTotal>,
}

/// One semester of a report
#[derive(Debug, Clone)]
pub struct SemesterView {
    /// Display name
    pub name: String,
    /// Acquired-credits semester
    pub locked: bool,
    /// Total credits
    pub credits: String,
    /// Courses in order
    pub courses: Vec<CourseRow>,
}

/// One course line of a report
#[derive(Debug, Clone)]
pub struct CourseRow {
    /// Display code
    pub code: String,
    /// Display name
    pub name: String,
    /// Credits
    pub credits: String,
    /// Comma-separated category tags
    pub tags: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: format_credits(course.credits),
            tags: course
                .types
                .iter()
                .map(|t| t.replace('_', " "))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Credits of one category tag
#[derive(Debug, Clone)]
pub struct TypeTotal {
    /// Tag, underscores shown as spaces
    pub tag: String,
    /// Placed credits carrying the tag
    pub credits: String,
}

/// Whole credits without decimals, fractional credits with one
#[must_use]
pub fn format_credits(credits: f32) -> String {
    if (credits - credits.round()).abs() < f32::EPSILON {
        format!("{credits:.0}")
    } else {
        format!("{credits:.1}")
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report content
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Render the report and write it to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Schedule, Semester};

    fn document() -> ScheduleDocument {
        let schedule = Schedule::new(
            vec![Course::new("elec1", "Elective", "Free Elective", 3.0).with_type("elective")],
            vec![Semester::new("fall-2024", "Fall 2024")
                .with_course(Course::new("mac2311", "MAC 2311", "Calculus 1", 4.0).with_type("critical_tracking"))],
        );
        let mut document = ScheduleDocument::new("Plan A", schedule);
        document.current_semester = "Fall 2024".to_string();
        document.graduating_semester = "Spring 2028".to_string();
        document
    }

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(4.0), "4");
        assert_eq!(format_credits(1.5), "1.5");
        assert_eq!(format_credits(0.0), "0");
    }

    #[test]
    fn test_span() {
        let mut document = document();
        assert_eq!(ReportContext::new(&document, 120.0).span(), "Fall 2024 - Spring 2028");

        document.current_semester.clear();
        assert_eq!(ReportContext::new(&document, 120.0).span(), "until Spring 2028");

        document.graduating_semester.clear();
        assert!(ReportContext::new(&document, 120.0).span().is_empty());
    }

    #[test]
    fn test_view() {
        let document = document();
        let view = ReportContext::new(&document, 120.0).view();

        assert_eq!(view.title, "Plan A");
        assert_eq!(view.total_credits, "4");
        assert_eq!(view.percentage, 3);
        assert_eq!(view.remaining, "116");
        assert_eq!(view.semesters[0].courses[0].tags, "critical tracking");
        assert_eq!(view.pool.len(), 1);
        assert_eq!(view.by_type.len(), 1);
        assert_eq!(view.by_type[0].tag, "critical tracking");
    }
}
