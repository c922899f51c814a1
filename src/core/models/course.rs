//! Course model

use serde::{Deserialize, Serialize};

/// A catalog course that can be placed into semesters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Opaque identifier, unique within the catalog (e.g., "cop3502c")
    pub id: String,

    /// Display code (e.g., "COP 3502C")
    pub code: String,

    /// Display name (e.g., "Programming Fundamentals 1")
    pub name: String,

    /// Credit hours (can be fractional)
    pub credits: f32,

    /// Category tags such as "core", "elective" or "critical_tracking"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// Whether the course may sit in the pool and in semesters at the same time
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeatable: bool,
}

impl Course {
    /// Create a new non-repeatable course without category tags
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `code` - Display code
    /// * `name` - Display name
    /// * `credits` - Credit hours (can be fractional)
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        credits: f32,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            credits,
            types: Vec::new(),
            repeatable: false,
        }
    }

    /// Mark the course as repeatable
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Add a category tag, ignoring duplicates
    #[must_use]
    pub fn with_type(mut self, tag: impl Into<String>) -> Self {
        self.add_type(tag.into());
        self
    }

    /// Add a category tag by name
    pub fn add_type(&mut self, tag: String) {
        if !self.types.contains(&tag) {
            self.types.push(tag);
        }
    }

    /// Whether the course carries the given category tag
    #[must_use]
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}
