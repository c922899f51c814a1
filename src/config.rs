//! Configuration module for `Calendurr`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the calendurr config directory in path values
const DIR_VARIABLE: &str = "$CALENDURR";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding one JSON document per schedule
    #[serde(default)]
    pub schedules_dir: String,
    /// Directory for rendered schedule reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Credits required to graduate; progress is measured against it
    #[serde(default)]
    pub credit_goal: f32,
    /// Display name of the locked acquired-credits semester
    #[serde(default)]
    pub acquired_credits_name: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override schedules directory
    pub schedules_dir: Option<String>,
    /// Override reports directory
    pub reports_dir: Option<String>,
    /// Override credit goal
    pub credit_goal: Option<f32>,
}

impl Config {
    /// Get the `$CALENDURR` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/calendurr`
    /// - macOS: `~/Library/Application Support/calendurr`
    /// - Windows: `%APPDATA%\calendurr`
    #[must_use]
    pub fn get_calendurr_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calendurr")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or a non-positive credit goal) in the current
    /// config and set in defaults are updated, so upgrades pick up new keys
    /// without clobbering user settings.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.schedules_dir.is_empty() && !defaults.paths.schedules_dir.is_empty() {
            self.paths
                .schedules_dir
                .clone_from(&defaults.paths.schedules_dir);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        if self.planner.credit_goal <= 0.0 && defaults.planner.credit_goal > 0.0 {
            self.planner.credit_goal = defaults.planner.credit_goal;
            changed = true;
        }
        if self.planner.acquired_credits_name.is_empty()
            && !defaults.planner.acquired_credits_name.is_empty()
        {
            self.planner
                .acquired_credits_name
                .clone_from(&defaults.planner.acquired_credits_name);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the config file is not touched. Only
    /// non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(schedules_dir) = &overrides.schedules_dir {
            self.paths.schedules_dir.clone_from(schedules_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }

        if let Some(goal) = overrides.credit_goal {
            self.planner.credit_goal = goal;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_calendurr_dir`](Self::get_calendurr_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_calendurr_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CALENDURR` in a string to the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let calendurr_dir = Self::get_calendurr_dir();
            value.replace(DIR_VARIABLE, calendurr_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$CALENDURR` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.schedules_dir = Self::expand_variables(&config.paths.schedules_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// Existing files get missing fields merged in from defaults and are saved
    /// back. Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `schedules_dir`,
    /// `reports_dir`, `credit_goal`, `acquired_credits_name` (dashed spellings
    /// are accepted too).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "schedules_dir" | "schedules-dir" => Some(self.paths.schedules_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "credit_goal" | "credit-goal" => Some(self.planner.credit_goal.to_string()),
            "acquired_credits_name" | "acquired-credits-name" => {
                Some(self.planner.acquired_credits_name.clone())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// (a non-boolean `verbose`, a non-positive or non-numeric `credit_goal`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "schedules_dir" | "schedules-dir" => self.paths.schedules_dir = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "credit_goal" | "credit-goal" => {
                self.planner.credit_goal = parse_credit_goal(value)?;
            }
            "acquired_credits_name" | "acquired-credits-name" => {
                self.planner.acquired_credits_name = value.to_string();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "schedules_dir" | "schedules-dir" => self
                .paths
                .schedules_dir
                .clone_from(&defaults.paths.schedules_dir),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "credit_goal" | "credit-goal" => {
                self.planner.credit_goal = defaults.planner.credit_goal;
            }
            "acquired_credits_name" | "acquired-credits-name" => self
                .planner
                .acquired_credits_name
                .clone_from(&defaults.planner.acquired_credits_name),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

/// Parse a credit goal, which must be a positive number
///
/// # Errors
/// Returns an error for non-numeric, non-finite, or non-positive values.
pub fn parse_credit_goal(value: &str) -> Result<f32, String> {
    let goal = value
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid number for 'credit_goal': '{value}'"))?;
    if goal.is_finite() && goal > 0.0 {
        Ok(goal)
    } else {
        Err(format!("'credit_goal' must be positive, got '{value}'"))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  schedules_dir = \"{}\"", self.paths.schedules_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  credit_goal = {}", self.planner.credit_goal)?;
        writeln!(
            f,
            "  acquired_credits_name = \"{}\"",
            self.planner.acquired_credits_name
        )?;

        Ok(())
    }
}
