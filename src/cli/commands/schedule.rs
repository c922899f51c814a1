//! Schedule command handlers
//!
//! Every editing command loads the stored document into a [`Session`], dispatches
//! one action, and saves the document back only if the action changed it.

use super::confirm;
use calendurr::config::Config;
use calendurr::core::catalog::{load_catalog, model_schedule};
use calendurr::core::error::StoreError;
use calendurr::core::lifecycle::with_acquired_credits;
use calendurr::core::models::{ContainerId, Course, Schedule, POOL_ID};
use calendurr::core::placement::{MoveRequest, Slot};
use calendurr::core::progress::{compute_progress, credits_by_type, semester_loads};
use calendurr::core::report::format_credits;
use calendurr::core::session::{Action, Session};
use calendurr::core::store::{schedule_key, JsonFileStore, ScheduleDocument, ScheduleStore};
use calendurr::{debug, info, verbose};
use std::path::PathBuf;

/// Options of the `new` command
#[derive(Debug, Default)]
pub struct NewSchedule {
    /// Schedule name
    pub name: String,
    /// Major
    pub major: Option<String>,
    /// Current semester
    pub current: Option<String>,
    /// Graduating semester
    pub graduating: Option<String>,
    /// TOML catalog filling the pool
    pub catalog: Option<PathBuf>,
    /// Start from the model plan
    pub model: bool,
    /// Skip the acquired-credits semester
    pub no_acquired: bool,
}

/// How the `move` command names its gesture
#[derive(Debug)]
pub enum MoveInput {
    /// Explicit source and destination slots
    Slots {
        /// Source container id
        from: String,
        /// Source index
        index: usize,
        /// Destination container id; `None` drops outside every container
        to: Option<String>,
        /// Destination index; `None` appends
        at: Option<usize>,
    },
    /// Raw drag result JSON
    Gesture(String),
}

impl MoveInput {
    /// Resolve the input into a typed move request
    ///
    /// # Errors
    /// Returns a message if the gesture JSON is not a drag result.
    pub fn to_request(&self) -> Result<MoveRequest, String> {
        match self {
            Self::Slots { from, index, to, at } => {
                let source = Slot::new(ContainerId::parse(from), *index);
                Ok(match to {
                    Some(to) => MoveRequest::new(
                        source,
                        Slot::new(ContainerId::parse(to), at.unwrap_or(usize::MAX)),
                    ),
                    None => MoveRequest::dropped_outside(source),
                })
            }
            Self::Gesture(json) => MoveRequest::from_gesture_json(json)
                .map_err(|e| format!("Invalid gesture: {e}")),
        }
    }
}

/// Store configured by `paths.schedules_dir`
#[must_use]
pub fn open_store(config: &Config) -> JsonFileStore {
    JsonFileStore::new(&config.paths.schedules_dir)
}

fn load(store: &impl ScheduleStore, name: &str) -> Result<ScheduleDocument, String> {
    store.load(name).map_err(|e| match e {
        StoreError::NotFound(_) => format!("No schedule named '{name}' (see `calendurr list`)"),
        other => format!("Failed to load schedule '{name}': {other}"),
    })
}

fn save(store: &impl ScheduleStore, session: &mut Session) -> Result<(), String> {
    store
        .save(session.document())
        .map_err(|e| format!("Failed to save schedule '{}': {e}", session.document().name))?;
    session.mark_saved();
    Ok(())
}

/// Create and store a new schedule
///
/// # Errors
/// Returns a message if a schedule with the same key exists, the catalog cannot
/// be loaded, or the store cannot be written.
pub fn create(store: &impl ScheduleStore, options: NewSchedule, config: &Config) -> Result<(), String> {
    let key = schedule_key(&options.name);
    let existing = store.list().map_err(|e| format!("Failed to list schedules: {e}"))?;
    if existing.contains(&key) {
        return Err(format!("Schedule '{}' already exists", options.name));
    }

    let mut schedule = if options.model {
        model_schedule()
    } else if let Some(path) = &options.catalog {
        let pool = load_catalog(path)
            .map_err(|e| format!("Failed to load catalog {}: {e}", path.display()))?;
        info!("Loaded {} courses from {}", pool.len(), path.display());
        Schedule::new(pool, Vec::new())
    } else {
        Schedule::default()
    };

    if !options.no_acquired {
        schedule = with_acquired_credits(&schedule, &config.planner.acquired_credits_name);
    }

    let mut document = ScheduleDocument::new(options.name, schedule);
    document.major = options.major.unwrap_or_default();
    document.current_semester = options.current.unwrap_or_default();
    document.graduating_semester = options.graduating.unwrap_or_default();

    store
        .save(&document)
        .map_err(|e| format!("Failed to save schedule '{}': {e}", document.name))?;

    println!(
        "✓ Created schedule '{}' with {} semesters and {} unassigned courses",
        document.name,
        document.schedule.semesters.len(),
        document.schedule.pool.len()
    );
    Ok(())
}

/// List stored schedules
///
/// # Errors
/// Returns a message if the store cannot be read.
pub fn list(store: &JsonFileStore) -> Result<(), String> {
    let keys = store
        .list()
        .map_err(|e| format!("Failed to list schedules: {e}"))?;

    if keys.is_empty() {
        println!("No schedules in {}", store.root().display());
        return Ok(());
    }
    for key in keys {
        println!("{key}");
    }
    Ok(())
}

fn print_course(position: usize, course: &Course) {
    let mut line = format!(
        "  {position:>2}. {:<12} {} ({} cr)",
        course.code,
        course.name,
        format_credits(course.credits)
    );
    if course.repeatable {
        line.push_str(" [repeatable]");
    }
    println!("{line}");
}

/// Print a schedule's semesters, pool and progress
///
/// # Errors
/// Returns a message if the schedule cannot be loaded.
pub fn show(store: &impl ScheduleStore, name: &str, config: &Config) -> Result<(), String> {
    let document = load(store, name)?;
    let schedule = &document.schedule;

    println!("\n=== {} ===", document.name);
    if !document.major.is_empty() {
        println!("Major: {}", document.major);
    }
    if !document.current_semester.is_empty() || !document.graduating_semester.is_empty() {
        println!(
            "Planned: {} - {}",
            document.current_semester, document.graduating_semester
        );
    }

    for (semester, load) in schedule.semesters.iter().zip(semester_loads(schedule)) {
        let lock = if load.locked { ", locked" } else { "" };
        println!(
            "\n{} [{}{lock}] {} credits",
            semester.name,
            semester.id,
            format_credits(load.credits)
        );
        if semester.courses.is_empty() {
            println!("  (empty)");
        }
        for (position, course) in semester.courses.iter().enumerate() {
            print_course(position, course);
        }
    }

    println!("\nUnassigned courses [{POOL_ID}]");
    if schedule.pool.is_empty() {
        println!("  (none)");
    }
    for (position, course) in schedule.pool.iter().enumerate() {
        print_course(position, course);
    }

    let progress = compute_progress(schedule, config.planner.credit_goal);
    println!(
        "\nProgress: {} / {} credits ({}%)",
        format_credits(progress.total_credits),
        format_credits(progress.goal),
        progress.percentage
    );
    Ok(())
}

/// Apply one move to a stored schedule
///
/// # Errors
/// Returns a message if the schedule cannot be loaded or saved, or the move is
/// rejected.
pub fn move_course(
    store: &impl ScheduleStore,
    name: &str,
    input: &MoveInput,
    config: &Config,
) -> Result<(), String> {
    let request = input.to_request()?;
    debug!("Move request: {request:?}");

    let document = load(store, name)?;
    // A no-op gesture may name an empty slot; the engine rejects it otherwise.
    let code = document
        .schedule
        .course_at(&request.source.container, request.source.index)
        .map(|c| c.code.clone())
        .ok();

    let mut session = Session::new(document, config.planner.credit_goal);
    session
        .dispatch(&Action::Move(request.clone()))
        .map_err(|e| e.to_string())?;

    if !session.is_dirty() {
        match code {
            Some(code) => println!("✓ {code} stays where it is; schedule unchanged"),
            None => println!("✓ Nothing to move; schedule unchanged"),
        }
        return Ok(());
    }
    save(store, &mut session)?;
    let code = code.unwrap_or_default();

    let destination = request
        .destination
        .map_or(ContainerId::Pool, |slot| slot.container);
    let destination = if session.schedule().contains_container(&destination) {
        destination.to_string()
    } else {
        ContainerId::Pool.to_string()
    };
    println!("✓ Moved {code} from {} to {destination}", request.source.container);
    verbose!("  progress now {}%", session.progress().percentage);
    Ok(())
}

/// Append a semester to a stored schedule
///
/// # Errors
/// Returns a message if the schedule cannot be loaded or saved.
pub fn add_semester(
    store: &impl ScheduleStore,
    name: &str,
    semester_name: &str,
    config: &Config,
) -> Result<(), String> {
    if semester_name.trim().is_empty() {
        return Err("Semester name must not be empty".to_string());
    }

    let mut session = Session::new(load(store, name)?, config.planner.credit_goal);
    session
        .dispatch(&Action::AddSemester {
            name: semester_name.to_string(),
        })
        .map_err(|e| e.to_string())?;
    save(store, &mut session)?;

    let id = session
        .schedule()
        .semesters
        .last()
        .map(|s| s.id.clone())
        .unwrap_or_default();
    println!("✓ Added semester '{}' (id: {id})", semester_name.trim());
    Ok(())
}

/// Remove an empty, unlocked semester from a stored schedule
///
/// # Errors
/// Returns a message if the schedule cannot be loaded or saved, or the
/// semester is unknown, locked, or not empty.
pub fn remove_semester(
    store: &impl ScheduleStore,
    name: &str,
    id: &str,
    config: &Config,
) -> Result<(), String> {
    let mut session = Session::new(load(store, name)?, config.planner.credit_goal);
    session
        .dispatch(&Action::RemoveSemester { id: id.to_string() })
        .map_err(|e| e.to_string())?;
    save(store, &mut session)?;

    println!("✓ Removed semester '{id}'");
    Ok(())
}

/// Print progress toward the credit goal
///
/// # Errors
/// Returns a message if the schedule cannot be loaded.
pub fn progress(
    store: &impl ScheduleStore,
    name: &str,
    goal: Option<f32>,
    config: &Config,
) -> Result<(), String> {
    let document = load(store, name)?;
    let goal = goal.unwrap_or(config.planner.credit_goal);
    let progress = compute_progress(&document.schedule, goal);

    println!(
        "{}: {} / {} credits ({}%)",
        document.name,
        format_credits(progress.total_credits),
        format_credits(progress.goal),
        progress.percentage
    );
    if progress.is_complete() {
        println!("✓ Credit goal reached");
    } else {
        println!("{} credits remaining", format_credits(progress.remaining_credits()));
    }

    for load in semester_loads(&document.schedule) {
        verbose!(
            "  {:<20} {:>5} credits, {} courses",
            load.name,
            format_credits(load.credits),
            load.course_count
        );
    }
    for (tag, credits) in credits_by_type(&document.schedule) {
        verbose!("  {:<20} {:>5} credits", tag.replace('_', " "), format_credits(credits));
    }
    Ok(())
}

/// Delete a stored schedule, asking first unless `yes` is set
///
/// # Errors
/// Returns a message if no such schedule exists or it cannot be removed.
pub fn delete(store: &impl ScheduleStore, name: &str, yes: bool) -> Result<(), String> {
    let document = load(store, name)?;

    if !yes && !confirm(&format!("Delete schedule '{}'?", document.name)) {
        println!("✗ Delete cancelled");
        return Ok(());
    }

    store
        .delete(name)
        .map_err(|e| format!("Failed to delete schedule '{name}': {e}"))?;
    println!("✓ Deleted schedule '{}'", document.name);
    Ok(())
}
