//! Report command handler
//!
//! Renders a stored schedule as Markdown or HTML into the reports directory
//! or an explicit output path.

use calendurr::config::Config;
use calendurr::core::report::{ReportContext, ReportFormat};
use calendurr::core::store::{JsonFileStore, ScheduleStore};
use calendurr::info;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `store` - Store holding the schedule
/// * `name` - Schedule name
/// * `format_str` - Report format (markdown, md, html)
/// * `output_file` - Optional output path
/// * `config` - Configuration containing the reports directory and credit goal
///
/// # Errors
/// Returns a message if the format is unknown, the schedule cannot be loaded,
/// or the report cannot be written.
pub fn run(
    store: &JsonFileStore,
    name: &str,
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)?;
    let document = store
        .load(name)
        .map_err(|e| format!("Failed to load schedule '{name}': {e}"))?;

    let output_path = output_file.map_or_else(
        || default_output_path(&config.paths.reports_dir, &document.key(), format),
        Path::to_path_buf,
    );

    let ctx = ReportContext::new(&document, config.planner.credit_goal);
    format
        .generator()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to write report {}: {e}", output_path.display()))?;

    info!("{format} report for '{}' written", document.name);
    println!("✓ Report generated: {}", output_path.display());
    Ok(())
}

/// `<reports_dir>/<key>.<ext>`
#[must_use]
pub fn default_output_path(reports_dir: &str, key: &str, format: ReportFormat) -> PathBuf {
    PathBuf::from(reports_dir).join(format!("{key}.{}", format.extension()))
}
