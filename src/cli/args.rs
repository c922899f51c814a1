//! CLI argument definitions for `calendurr`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use calendurr::config::{parse_credit_goal, ConfigOverrides};
use calendurr::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `schedules_dir`, `credit_goal`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SemesterSubcommand {
    /// Append an empty semester to a schedule.
    Add {
        /// Schedule name
        #[arg(value_name = "SCHEDULE")]
        schedule: String,
        /// Display name of the new semester (e.g., "Fall 2027")
        #[arg(value_name = "SEMESTER_NAME")]
        name: String,
    },
    /// Remove an empty, unlocked semester from a schedule.
    Remove {
        /// Schedule name
        #[arg(value_name = "SCHEDULE")]
        schedule: String,
        /// Id of the semester to remove (as shown by `show`)
        #[arg(value_name = "SEMESTER_ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Create a new schedule.
    ///
    /// The course pool starts empty, filled from a TOML catalog, or with the
    /// built-in model plan already placed.
    New {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,

        /// Major the schedule is for
        #[arg(long, value_name = "MAJOR")]
        major: Option<String>,

        /// Semester the student is currently in (e.g., "Fall 2024")
        #[arg(long, value_name = "SEMESTER")]
        current: Option<String>,

        /// Expected graduation semester (e.g., "Spring 2028")
        #[arg(long, value_name = "SEMESTER")]
        graduating: Option<String>,

        /// TOML catalog whose courses fill the pool
        #[arg(long, value_name = "FILE", conflicts_with = "model")]
        catalog: Option<PathBuf>,

        /// Start from the built-in eight-semester model plan
        #[arg(long)]
        model: bool,

        /// Do not add the locked acquired-credits semester
        #[arg(long)]
        no_acquired: bool,
    },
    /// List stored schedules.
    List,
    /// Show a schedule's semesters, pool and progress.
    Show {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Move a course between the pool and semesters.
    ///
    /// Either give the source and destination slots, or pass a raw drag result
    /// with `--gesture`. Omitting `--to` drops the course outside every
    /// container, which changes nothing.
    Move {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,

        /// Source container: `courses` (the pool) or a semester id
        #[arg(long, value_name = "CONTAINER", required_unless_present = "gesture")]
        from: Option<String>,

        /// Index of the course in the source container
        #[arg(long, value_name = "N", required_unless_present = "gesture")]
        index: Option<usize>,

        /// Destination container: `courses` (the pool) or a semester id
        #[arg(long, value_name = "CONTAINER")]
        to: Option<String>,

        /// Destination index (default: end of the destination)
        #[arg(long, value_name = "N", requires = "to")]
        at: Option<usize>,

        /// Raw drag result JSON: `{"source":{"droppableId":..,"index":..},"destination":..}`
        #[arg(long, value_name = "JSON", conflicts_with_all = ["from", "index", "to", "at"])]
        gesture: Option<String>,
    },
    /// Add or remove semesters.
    Semester {
        #[command(subcommand)]
        subcommand: SemesterSubcommand,
    },
    /// Show progress toward the credit goal.
    Progress {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,

        /// Credit goal for this run (default: config `credit_goal`)
        #[arg(long, value_name = "CREDITS", value_parser = parse_credit_goal)]
        goal: Option<f32>,
    },
    /// Generate a schedule report.
    Report {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "md")]
        format: String,

        /// Output file path (optional; defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Delete a stored schedule (requires confirmation).
    Delete {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "calendurr",
    about = "Plan courses across semesters from the command line",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config schedules directory
    #[arg(long = "schedules-dir", value_name = "DIR")]
    pub schedules_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config credit goal
    #[arg(long = "credit-goal", value_name = "CREDITS", value_parser = parse_credit_goal)]
    pub credit_goal: Option<f32>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            schedules_dir: self
                .schedules_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            credit_goal: self.credit_goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["calendurr", "list"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.schedules_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.credit_goal.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "calendurr",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--schedules-dir",
            "/data/schedules",
            "--credit-goal",
            "128",
            "list",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.schedules_dir, Some("/data/schedules".to_string()));
        assert!(overrides.reports_dir.is_none());
        assert_eq!(overrides.credit_goal, Some(128.0));
    }

    #[test]
    fn test_rejects_non_positive_credit_goal() {
        assert!(Cli::try_parse_from(["calendurr", "--credit-goal", "0", "list"]).is_err());
        assert!(Cli::try_parse_from(["calendurr", "progress", "plan", "--goal", "-3"]).is_err());
    }

    #[test]
    fn test_move_with_slots() {
        let cli = Cli::parse_from([
            "calendurr", "move", "plan", "--from", "courses", "--index", "2", "--to", "fall-2024", "--at", "0",
        ]);

        match cli.command {
            Command::Move { from, index, to, at, gesture, .. } => {
                assert_eq!(from.as_deref(), Some("courses"));
                assert_eq!(index, Some(2));
                assert_eq!(to.as_deref(), Some("fall-2024"));
                assert_eq!(at, Some(0));
                assert!(gesture.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_move_requires_source_or_gesture() {
        assert!(Cli::try_parse_from(["calendurr", "move", "plan"]).is_err());
        assert!(Cli::try_parse_from(["calendurr", "move", "plan", "--from", "courses"]).is_err());
        assert!(Cli::try_parse_from([
            "calendurr", "move", "plan", "--gesture", "{}", "--from", "courses"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["calendurr", "move", "plan", "--gesture", "{}"]).is_ok());
    }

    #[test]
    fn test_new_catalog_conflicts_with_model() {
        assert!(Cli::try_parse_from([
            "calendurr", "new", "plan", "--model", "--catalog", "catalog.toml"
        ])
        .is_err());
    }

    #[test]
    fn test_semester_subcommands() {
        let cli = Cli::parse_from(["calendurr", "semester", "add", "plan", "Fall 2027"]);
        assert!(matches!(
            cli.command,
            Command::Semester { subcommand: SemesterSubcommand::Add { ref name, .. } } if name == "Fall 2027"
        ));
    }
}
