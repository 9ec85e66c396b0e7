//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and its priority scale.
//! - Provide creation drafts (`NewTask`) and partial updates (`TaskPatch`).
//!
//! # Invariants
//! - `id` is a fresh UUID string and `created_at` is the creation instant;
//!   `TaskPatch` has no way to address either of them.
//! - Records persisted before folders existed (no `folder`, or an empty one)
//!   deserialize into the inbox folder.
//! - Unknown or missing priority values deserialize as `Priority::None`.

use crate::model::folder::{FolderId, INBOX_FOLDER_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = String;

/// Task priority, also used as the matrix grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    /// All priorities in display order, highest first.
    pub const ALL: [Priority; 4] = [
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::None,
    ];

    /// Stable persisted label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Parses a persisted label; matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default())
    }
}

/// Persisted task record.
///
/// Serialized with camelCase field names; dates are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_folder", deserialize_with = "deserialize_folder")]
    pub folder: FolderId,
}

impl Task {
    /// Creates a task from a draft with a generated id and `created_at = now`.
    pub fn new(draft: NewTask) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), Utc::now(), draft)
    }

    /// Creates a task with caller-provided identity.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<TaskId>, created_at: DateTime<Utc>, draft: NewTask) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            completed: false,
            due_date: draft.due_date,
            created_at,
            priority: draft.priority.unwrap_or_default(),
            folder: normalize_folder(draft.folder),
        }
    }

    /// Merges every field set on `patch` into this task.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(folder) = &patch.folder {
            self.folder = normalize_folder(Some(folder.clone()));
        }
    }

    /// Re-applies construction defaults to a record loaded from storage.
    pub fn normalize_legacy(mut self) -> Self {
        if self.folder.trim().is_empty() {
            self.folder = default_folder();
        }
        self
    }
}

/// Creation input for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// `None` means `Priority::None`.
    pub priority: Option<Priority>,
    /// `None` (or an empty id) means the inbox.
    pub folder: Option<FolderId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn in_folder(mut self, folder: impl Into<FolderId>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// Partial update for a task.
///
/// Nested options distinguish "leave unchanged" (`None`) from "clear"
/// (`Some(None)`) for optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<Priority>,
    pub folder: Option<FolderId>,
}

impl TaskPatch {
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn folder(folder: impl Into<FolderId>) -> Self {
        Self {
            folder: Some(folder.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn default_folder() -> FolderId {
    INBOX_FOLDER_ID.to_string()
}

fn normalize_folder(folder: Option<FolderId>) -> FolderId {
    match folder {
        Some(folder) if !folder.trim().is_empty() => folder,
        _ => default_folder(),
    }
}

fn deserialize_folder<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FolderId, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_folder(raw))
}
