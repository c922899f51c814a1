//! Schedule persistence
//!
//! The planner core only produces and consumes [`ScheduleDocument`] values;
//! where they live is up to a [`ScheduleStore`]. The bundled store keeps one
//! pretty-printed JSON file per schedule.

use crate::core::error::StoreError;
use crate::core::lifecycle::slugify;
use crate::core::models::Schedule;
use crate::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of stored schedules
const SCHEDULE_EXTENSION: &str = "json";

/// A schedule plus its display metadata; the unit of persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    /// Schedule name (e.g., "Four Year Plan")
    pub name: String,

    /// Major the schedule is for
    #[serde(default)]
    pub major: String,

    /// Semester the student is currently in (e.g., "Fall 2024")
    #[serde(default)]
    pub current_semester: String,

    /// Expected graduation semester (e.g., "Spring 2028")
    #[serde(default)]
    pub graduating_semester: String,

    /// Pool and semesters
    #[serde(flatten)]
    pub schedule: Schedule,
}

impl ScheduleDocument {
    /// Create a document with empty metadata
    #[must_use]
    pub fn new(name: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            name: name.into(),
            major: String::new(),
            current_semester: String::new(),
            graduating_semester: String::new(),
            schedule,
        }
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the schedule breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: Self = serde_json::from_str(json)?;
        document.schedule.validate()?;
        Ok(document)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File-name friendly key of this document
    #[must_use]
    pub fn key(&self) -> String {
        schedule_key(&self.name)
    }
}

/// File-name friendly key for a schedule name
#[must_use]
pub fn schedule_key(name: &str) -> String {
    let key = slugify(name);
    if key.is_empty() {
        "schedule".to_string()
    } else {
        key
    }
}

/// Load/save contract for schedule documents
pub trait ScheduleStore {
    /// Load the schedule stored under `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing is stored under `name`, or a
    /// read/parse/validation error.
    fn load(&self, name: &str) -> Result<ScheduleDocument, StoreError>;

    /// Store a document under its own name, replacing any previous version
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    fn save(&self, document: &ScheduleDocument) -> Result<(), StoreError>;

    /// Keys of all stored schedules, sorted
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Delete the schedule stored under `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing is stored under `name`.
    fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// Stores each schedule as `<key>.json` inside one directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`; the directory is created on first save
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the schedule files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds (or would hold) the schedule named `name`
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{SCHEDULE_EXTENSION}", schedule_key(name)))
    }
}

impl ScheduleStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<ScheduleDocument, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        debug!("Loading schedule from {}", path.display());
        load_document(&path)
    }

    fn save(&self, document: &ScheduleDocument) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        save_document(&self.path_for(&document.name), document)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_schedule = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == SCHEDULE_EXTENSION);
            if let (true, Some(stem)) = (is_schedule, path.file_stem().and_then(|s| s.to_str())) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        info!("Deleted schedule {}", path.display());
        Ok(())
    }
}

/// Read and validate a schedule document from a JSON file
///
/// # Errors
/// Returns an error if the file cannot be read, is not a schedule document, or
/// breaks a schedule invariant.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<ScheduleDocument, StoreError> {
    let content = fs::read_to_string(path)?;
    ScheduleDocument::from_json(&content)
}

/// Write a schedule document as pretty-printed JSON
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_document<P: AsRef<Path>>(path: P, document: &ScheduleDocument) -> Result<(), StoreError> {
    let path = path.as_ref();
    fs::write(path, document.to_json()?)?;
    info!("Saved schedule '{}' to {}", document.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlannerError;

    #[test]
    fn test_schedule_key() {
        assert_eq!(schedule_key("Four Year Plan"), "four-year-plan");
        assert_eq!(schedule_key("!!!"), "schedule");
    }

    #[test]
    fn test_from_json_accepts_backend_field_names() {
        let json = r#"{
            "name": "Plan A",
            "major": "Computer Science",
            "availableCourses": [{"id":"a","code":"A 1","name":"A","credits":3}],
            "semesters": [{"id":"fall","name":"Fall","courses":[]}]
        }"#;
        let document = ScheduleDocument::from_json(json).unwrap();

        assert_eq!(document.major, "Computer Science");
        assert_eq!(document.schedule.pool.len(), 1);
        assert_eq!(document.schedule.semesters[0].id, "fall");
        assert!(document.current_semester.is_empty());
    }

    #[test]
    fn test_from_json_accepts_bucket_field_names() {
        let json = r#"{
            "name": "Plan B",
            "pool": [],
            "buckets": [{"id":"acq","name":"Acquired","isLocked":true,
                         "items":[{"id":"ap","code":"AP","name":"AP Calc","credits":4}]}]
        }"#;
        let document = ScheduleDocument::from_json(json).unwrap();

        assert!(document.schedule.semesters[0].is_locked);
        assert_eq!(document.schedule.semesters[0].courses[0].id, "ap");
    }

    #[test]
    fn test_from_json_rejects_inconsistent_schedule() {
        let json = r#"{
            "name": "Broken",
            "pool": [{"id":"a","code":"A 1","name":"A","credits":3}],
            "semesters": [{"id":"fall","name":"Fall",
                           "courses":[{"id":"a","code":"A 1","name":"A","credits":3}]}]
        }"#;

        assert!(matches!(
            ScheduleDocument::from_json(json),
            Err(StoreError::Planner(PlannerError::Inconsistent(_)))
        ));
    }

    #[test]
    fn test_to_json_uses_camel_case() {
        let mut document = ScheduleDocument::new("Plan", Schedule::default());
        document.graduating_semester = "Spring 2028".to_string();
        let json = document.to_json().unwrap();

        assert!(json.contains("\"graduatingSemester\": \"Spring 2028\""));
        assert!(json.contains("\"pool\""));
        assert!(json.contains("\"semesters\""));
    }
}
