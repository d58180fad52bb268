//! Read models built from the repositories for display.

use serde::Serialize;
use taskbox_core::{EffectiveStatus, PriorityStats, Project, ProjectStats, Task, TaskStats};

/// A visible task with its display status and resolved project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// The stored record.
    pub task: Task,
    /// `overdue` when past due and open, otherwise the stored status.
    pub effective_status: EffectiveStatus,
    /// Owning project, or the default project for unset/dangling references.
    pub project: Project,
}

/// Everything the overview screen shows, computed over all tasks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Status bucket and overdue counts.
    pub stats: TaskStats,
    /// Rounded completed share, in percent.
    pub completion_rate: u32,
    /// Per-project breakdown, in project order.
    pub projects: Vec<ProjectStats>,
    /// Per-priority counts.
    pub priorities: PriorityStats,
    /// Most recently created tasks.
    pub recent: Vec<Task>,
    /// Open tasks with the nearest due dates.
    pub upcoming: Vec<Task>,
}
