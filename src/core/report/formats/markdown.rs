//! Markdown report generator
//!
//! One table per semester plus the unassigned pool and per-type totals.

use crate::core::report::{ReportContext, ReportGenerator, ReportView};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "schedule.md")]
struct MarkdownTemplate<'a> {
    view: &'a ReportView,
}

/// Markdown report generator
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let view = ctx.view();
        Ok(MarkdownTemplate { view: &view }.render()?)
    }
}
