//! Write-through task collection.

use std::sync::Arc;

use chrono::Utc;
use taskbox_core::{Task, TaskDraft, TaskPatch};
use taskbox_store::{KeyValueStore, TASKS_KEY, load_json_records, save_json};
use tracing::debug;

use crate::errors::{Result, TaskError, require};

/// Ordered task collection backed by `taskbox_tasks`.
///
/// New tasks go to the end. Every mutation saves the whole collection;
/// a failed save is logged and the in-memory collection stays authoritative.
pub struct TaskRepository {
    tasks: Vec<Task>,
    store: Arc<dyn KeyValueStore>,
}

impl TaskRepository {
    /// Load the saved collection. Missing or unreadable → empty.
    ///
    /// Individual records that fail to decode are skipped; the rest load.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let tasks: Vec<Task> = load_json_records(store.as_ref(), TASKS_KEY).unwrap_or_default();
        debug!(count = tasks.len(), "tasks loaded");
        Self { tasks, store }
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Task by ID.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there are no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a `pending` task from `draft` and append it.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task> {
        require("title", &draft.title)?;
        let task = Task::from_draft(draft, Utc::now());
        debug!(task_id = %task.id, "task added");
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Merge `patch` into the task with `id`.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            require("title", title)?;
        }
        let task = self.find_mut(id)?;
        task.apply_patch(patch, Utc::now());
        let updated = task.clone();
        debug!(task_id = %id, "task updated");
        self.persist();
        Ok(updated)
    }

    /// Remove the task with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(task_id = %id, "task deleted");
        }
        self.persist();
        removed
    }

    /// Flip completion: `pending ↔ completed`, `in-progress → pending`.
    pub fn toggle_status(&mut self, id: &str) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.status = task.status.toggled();
        task.updated_at = Utc::now();
        let toggled = task.clone();
        debug!(task_id = %id, status = %toggled.status, "task toggled");
        self.persist();
        Ok(toggled)
    }

    /// Remove every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.status.is_completed());
        let removed = before - self.tasks.len();
        debug!(removed, "completed tasks cleared");
        self.persist();
        removed
    }

    /// Replace the whole collection (bulk import).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        debug!(count = tasks.len(), "tasks replaced");
        self.tasks = tasks;
        self.persist();
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::task_not_found(id))
    }

    fn persist(&self) {
        let _ = save_json(self.store.as_ref(), TASKS_KEY, &self.tasks);
    }
}
