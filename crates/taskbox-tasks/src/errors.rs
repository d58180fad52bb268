//! Task error types.
//!
//! Unlike store failures, which are logged and dropped, these are returned
//! to the caller: the operation did not happen and state is unchanged.

use thiserror::Error;

/// Errors from repository mutations and task import/export.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type ("Task" or "Project").
        entity: &'static str,
        /// The ID that was looked up.
        id: String,
    },

    /// A required field was missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import payload is not valid JSON.
    #[error("Import failed: invalid JSON: {0}")]
    ImportParse(#[source] serde_json::Error),

    /// Import payload is valid JSON but not an array.
    #[error("Import failed: expected an array of tasks, found {found}")]
    ImportShape {
        /// JSON kind of the top-level value.
        found: &'static str,
    },

    /// An element of the import array is not a task record.
    #[error("Import failed: record {index} is not a task: {source}")]
    ImportRecord {
        /// Zero-based position in the array.
        index: usize,
        /// Why the element was rejected.
        #[source]
        source: serde_json::Error,
    },

    /// Encoding tasks for export failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TaskError {
    /// Create a not-found error for a task.
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }

    /// Create a not-found error for a project.
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Project",
            id: id.into(),
        }
    }
}

/// Result type for task operations.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Reject blank required text fields.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TaskError::Validation(format!("{field} is required")));
    }
    Ok(())
}
