//! Task record, its status/priority enums, and the draft/patch inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, non_empty};
use crate::errors::ParseError;
use crate::ids::generate_id;

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Stored task status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Wire name (`pending`, `in-progress`, `completed`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Whether this is the `completed` status.
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Status after a completion toggle.
    ///
    /// Flips between `completed` and `pending` only. An `in-progress` task
    /// lands on `pending`; toggling never restores `in-progress`.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::InProgress | Self::Completed => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ParseError::UnknownStatus(other.to_string())),
        }
    }
}

/// Task priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// All priorities, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: high=3, medium=2, low=1.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseError::UnknownPriority(other.to_string())),
        }
    }
}

/// Display-only status. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectiveStatus {
    /// Stored `pending`, not past due.
    Pending,
    /// Stored `in-progress`, not past due.
    InProgress,
    /// Stored `completed` (never overdue).
    Completed,
    /// Past its due date and not completed.
    Overdue,
}

impl From<TaskStatus> for EffectiveStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => Self::Pending,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Completed => Self::Completed,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Task
// ─────────────────────────────────────────────────────────────────────────────

/// A unit of work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID, immutable after creation.
    pub id: String,
    /// Non-empty title.
    pub title: String,
    /// Free-form description, may be empty.
    #[serde(default)]
    pub description: String,
    /// Stored status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional due instant.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Owning project. Unset or dangling references resolve to the default
    /// project at read time.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Short labels. Duplicates allowed.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation instant.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last mutation instant.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new `pending` task from a draft with a fresh ID.
    pub fn from_draft(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id("task"),
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            status: TaskStatus::Pending,
            priority: draft.priority.unwrap_or_default(),
            due_date: draft.due_date,
            project_id: non_empty(draft.project_id),
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into this task and refresh `updated_at`.
    pub fn apply_patch(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(project_id) = patch.project_id {
            self.project_id = non_empty(project_id);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }

    /// Past due and not completed, as of `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_completed() && self.due_date.is_some_and(|due| due < now)
    }

    /// Status for display: `overdue` overrides the stored status.
    pub fn effective_status_at(&self, now: DateTime<Utc>) -> EffectiveStatus {
        if self.is_overdue_at(now) {
            EffectiveStatus::Overdue
        } else {
            self.status.into()
        }
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Input for creating a task.
///
/// New tasks always start `pending`; missing priority defaults to `medium`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    /// Title (required, non-empty).
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Option<TaskPriority>,
    /// Due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Project reference. Empty string means none.
    pub project_id: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Draft with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a task. `None` leaves a field untouched.
///
/// `due_date` and `project_id` are doubly optional: `Some(None)` (JSON
/// `null`) clears the field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New due date, or `Some(None)` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// New project reference, or `Some(None)` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub project_id: Option<Option<String>>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
