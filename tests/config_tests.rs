//! Integration tests for configuration management

use calendurr::config::{parse_credit_goal, Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.schedules_dir.is_empty(),
        "Default schedules_dir should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!((config.planner.credit_goal - 120.0).abs() < f32::EPSILON);
    assert_eq!(config.planner.acquired_credits_name, "Acquired Credits");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
schedules_dir = "./schedules"
reports_dir = "./reports"

[planner]
credit_goal = 128.0
acquired_credits_name = "Transfer Credits"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.schedules_dir, "./schedules");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert!((config.planner.credit_goal - 128.0).abs() < f32::EPSILON);
    assert_eq!(config.planner.acquired_credits_name, "Transfer Credits");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert!(config.paths.schedules_dir.is_empty());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CALENDURR/calendurr.log"

[paths]
schedules_dir = "$CALENDURR/schedules"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("calendurr"));
    assert!(!config.logging.file.contains("$CALENDURR"));
    assert!(config.paths.schedules_dir.ends_with("schedules"));
    assert!(!config.paths.schedules_dir.contains("$CALENDURR"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("credit-goal", "64")
        .expect("Failed to set credit goal");
    assert_eq!(config.get("credit_goal").unwrap(), "64");

    config
        .set("schedules_dir", "/data/plans")
        .expect("Failed to set schedules dir");
    assert_eq!(config.get("schedules-dir").unwrap(), "/data/plans");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("credit_goal", "0").is_err());
    assert!(config.set("credit_goal", "lots").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("acquired_credits_name", "AP").unwrap();

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config.unset("acquired-credits-name", &defaults).unwrap();

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(
        config.planner.acquired_credits_name,
        defaults.planner.acquired_credits_name
    );
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("credit_goal", "96.5").unwrap();

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert!((loaded_config.planner.credit_goal - 96.5).abs() < f32::EPSILON);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        schedules_dir: Some("./custom_schedules".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        credit_goal: Some(60.0),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.schedules_dir, "./custom_schedules");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert!((config.planner.credit_goal - 60.0).abs() < f32::EPSILON);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.schedules_dir, defaults.paths.schedules_dir);
    assert!((config.planner.credit_goal - defaults.planner.credit_goal).abs() < f32::EPSILON);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[planner]"));
    assert!(display_str.contains("schedules_dir"));
    assert!(display_str.contains("credit_goal"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.schedules_dir, defaults.paths.schedules_dir);
    assert!((config.planner.credit_goal - defaults.planner.credit_goal).abs() < f32::EPSILON);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[planner]
credit_goal = 90.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert!((config.planner.credit_goal - 90.0).abs() < f32::EPSILON);
}

#[test]
fn test_parse_credit_goal() {
    assert_eq!(parse_credit_goal(" 120 "), Ok(120.0));
    assert!(parse_credit_goal("-1").is_err());
    assert!(parse_credit_goal("inf").is_err());
}

#[test]
fn test_get_calendurr_dir() {
    let dir = Config::get_calendurr_dir();

    assert!(dir.to_string_lossy().contains("calendurr"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
