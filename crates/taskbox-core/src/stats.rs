//! Statistics engine: aggregate counts over the task collection.
//!
//! All functions are pure and recompute from the snapshot on every call.
//! Overdue counts overlap the status buckets: an overdue `pending` task is
//! counted in both `pending` and `overdue`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Project, Task, TaskPriority, TaskStatus};

/// How many tasks the recent/upcoming dashboard lists show.
pub const DEFAULT_DASHBOARD_LIMIT: usize = 5;

/// Rounded percentage `part / total × 100`, half rounding up. `0` when
/// `total` is zero.
pub fn percent_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Status bucket counts plus overdue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Stored `completed`.
    pub completed: usize,
    /// Stored `pending`.
    pub pending: usize,
    /// Stored `in-progress`.
    pub in_progress: usize,
    /// Past due and not completed.
    pub overdue: usize,
}

impl TaskStats {
    /// Rounded completed share of all tasks, in percent.
    pub fn completion_rate(&self) -> u32 {
        percent_of(self.completed, self.total)
    }
}

/// Compute [`TaskStats`] as of the current instant.
pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    compute_stats_at(tasks, Utc::now())
}

/// Compute [`TaskStats`] as of `now`.
pub fn compute_stats_at(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    tasks.iter().fold(
        TaskStats {
            total: tasks.len(),
            ..TaskStats::default()
        },
        |mut stats, task| {
            match task.status {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
            }
            if task.is_overdue_at(now) {
                stats.overdue += 1;
            }
            stats
        },
    )
}

/// Per-project task counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Project ID.
    pub project_id: String,
    /// Project name.
    pub name: String,
    /// Project color hint.
    pub color: String,
    /// Tasks whose `projectId` equals this project's ID.
    pub task_count: usize,
    /// Of those, how many are completed.
    pub completed_count: usize,
    /// Rounded completed share, in percent.
    pub completion_rate: u32,
}

/// One [`ProjectStats`] per project, in project order.
///
/// Counts match on the raw `projectId`; unassigned or dangling references
/// are not attributed to any project here.
pub fn project_stats(tasks: &[Task], projects: &[Project]) -> Vec<ProjectStats> {
    projects
        .iter()
        .map(|project| {
            let (task_count, completed_count) = tasks
                .iter()
                .filter(|t| t.project_id.as_deref() == Some(project.id.as_str()))
                .fold((0, 0), |(total, done), t| {
                    (total + 1, done + usize::from(t.status.is_completed()))
                });
            ProjectStats {
                project_id: project.id.clone(),
                name: project.name.clone(),
                color: project.color.clone(),
                task_count,
                completed_count,
                completion_rate: percent_of(completed_count, task_count),
            }
        })
        .collect()
}

/// Task counts per priority, independent of status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityStats {
    /// High priority tasks.
    pub high: usize,
    /// Medium priority tasks.
    pub medium: usize,
    /// Low priority tasks.
    pub low: usize,
}

impl PriorityStats {
    /// Count for one priority.
    pub fn count(&self, priority: TaskPriority) -> usize {
        match priority {
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }
}

/// Count tasks per priority.
pub fn priority_stats(tasks: &[Task]) -> PriorityStats {
    tasks
        .iter()
        .fold(PriorityStats::default(), |mut stats, task| {
            match task.priority {
                TaskPriority::High => stats.high += 1,
                TaskPriority::Medium => stats.medium += 1,
                TaskPriority::Low => stats.low += 1,
            }
            stats
        })
}

/// The `limit` most recently created tasks, newest first.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut recent: Vec<&Task> = tasks.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.into_iter().take(limit).cloned().collect()
}

/// The `limit` open tasks with the nearest due dates, soonest first.
///
/// Only tasks with a due date and a status other than `completed` qualify.
pub fn upcoming_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut upcoming: Vec<(&Task, DateTime<Utc>)> = tasks
        .iter()
        .filter(|t| !t.status.is_completed())
        .filter_map(|t| t.due_date.map(|due| (t, due)))
        .collect();
    upcoming.sort_by_key(|(_, due)| *due);
    upcoming
        .into_iter()
        .take(limit)
        .map(|(t, _)| t.clone())
        .collect()
}
