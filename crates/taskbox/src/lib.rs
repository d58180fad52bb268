//! # taskbox
//!
//! The TaskBox facade. One [`TaskBox`] owns a store, the task, project, and
//! settings repositories built on it, and the current view state (filter
//! and sort). Presentation code reads the visible list and dashboard from
//! here and routes every mutation through the repositories.
//!
//! ```no_run
//! use taskbox::TaskBox;
//! use taskbox_core::TaskDraft;
//!
//! let mut tb = TaskBox::in_memory();
//! tb.tasks_mut().add(TaskDraft::titled("Write report"))?;
//! let visible = tb.visible_tasks();
//! # Ok::<(), taskbox::TaskboxError>(())
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod view;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use taskbox_core::logging::{LogFormat, init_subscriber_with_format};
use taskbox_core::{
    DEFAULT_DASHBOARD_LIMIT, FilterPatch, FilterSpec, SortSpec, Task, compute_stats_at,
    filter_and_sort, priority_stats, project_stats, recent_tasks, upcoming_tasks,
};
use taskbox_settings::{SettingsRepository, TaskboxConfig, load_config, load_config_from_path};
use taskbox_store::{KeyValueStore, MemoryStore, SqliteStore};
use taskbox_tasks::{ProjectRepository, TaskRepository, export_file_name, parse_import};
use tracing::{debug, info};

pub use errors::{Result, TaskboxError};
pub use view::{Dashboard, TaskView};

/// Install the global `tracing` subscriber described by `config`.
pub fn init_logging(config: &TaskboxConfig) {
    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_subscriber_with_format(&config.log_level, format);
}

/// Repositories over one store, plus the current filter and sort.
pub struct TaskBox {
    tasks: TaskRepository,
    projects: ProjectRepository,
    settings: SettingsRepository,
    filter: FilterSpec,
    sorting: SortSpec,
}

impl std::fmt::Debug for TaskBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskBox")
            .field("filter", &self.filter)
            .field("sorting", &self.sorting)
            .finish_non_exhaustive()
    }
}

impl TaskBox {
    /// Open the store named by `config.db_path` (`:memory:` for in-memory).
    pub fn open(config: &TaskboxConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = if config.is_in_memory() {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(SqliteStore::open(&config.db_path_buf())?)
        };
        info!(db_path = %config.db_path, "taskbox opened");
        Ok(Self::with_store(store))
    }

    /// Open using `~/.taskbox/config.json` and `TASKBOX_*` overrides.
    pub fn from_default_config() -> Result<Self> {
        Self::open(&load_config()?)
    }

    /// Open using the config file at `path` and `TASKBOX_*` overrides.
    ///
    /// A missing file means defaults; invalid JSON is an error.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Self::open(&load_config_from_path(path)?)
    }

    /// Load all repositories from `store`, with the default view.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tasks: TaskRepository::load(Arc::clone(&store)),
            projects: ProjectRepository::load(Arc::clone(&store)),
            settings: SettingsRepository::load(store),
            filter: FilterSpec::default(),
            sorting: SortSpec::default(),
        }
    }

    /// Ephemeral TaskBox backed by a [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    // ── Repositories ────────────────────────────────────────────────

    /// Task repository.
    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    /// Task repository, for mutation.
    pub fn tasks_mut(&mut self) -> &mut TaskRepository {
        &mut self.tasks
    }

    /// Project repository.
    pub fn projects(&self) -> &ProjectRepository {
        &self.projects
    }

    /// Project repository, for mutation.
    pub fn projects_mut(&mut self) -> &mut ProjectRepository {
        &mut self.projects
    }

    /// Settings repository.
    pub fn settings(&self) -> &SettingsRepository {
        &self.settings
    }

    /// Settings repository, for mutation.
    pub fn settings_mut(&mut self) -> &mut SettingsRepository {
        &mut self.settings
    }

    // ── View state ──────────────────────────────────────────────────

    /// Merge `patch` into the current filter.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.merge(patch);
        debug!(filter = ?self.filter, "filter changed");
    }

    /// Replace the current sort.
    pub fn set_sorting(&mut self, sorting: SortSpec) {
        debug!(%sorting, "sorting changed");
        self.sorting = sorting;
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Current sort.
    pub fn sorting(&self) -> SortSpec {
        self.sorting
    }

    // ── Views ───────────────────────────────────────────────────────

    /// The filtered, sorted task list.
    ///
    /// With `showCompleted` off, completed tasks are dropped before the
    /// filter runs, so a search cannot bring them back.
    pub fn visible_tasks(&self) -> Vec<Task> {
        let all = self.tasks.all();
        if self.settings.get().show_completed {
            return filter_and_sort(all, &self.filter, &self.sorting);
        }
        let open: Vec<Task> = all
            .iter()
            .filter(|t| !t.status.is_completed())
            .cloned()
            .collect();
        filter_and_sort(&open, &self.filter, &self.sorting)
    }

    /// [`Self::visible_tasks`] with display status and resolved project.
    pub fn task_views(&self, now: DateTime<Utc>) -> Vec<TaskView> {
        self.visible_tasks()
            .into_iter()
            .map(|task| TaskView {
                effective_status: task.effective_status_at(now),
                project: self.projects.resolve(task.project_id.as_deref()).clone(),
                task,
            })
            .collect()
    }

    /// Statistics over all tasks as of `now`, ignoring the view state.
    pub fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let tasks = self.tasks.all();
        let stats = compute_stats_at(tasks, now);
        Dashboard {
            stats,
            completion_rate: stats.completion_rate(),
            projects: project_stats(tasks, self.projects.all()),
            priorities: priority_stats(tasks),
            recent: recent_tasks(tasks, DEFAULT_DASHBOARD_LIMIT),
            upcoming: upcoming_tasks(tasks, DEFAULT_DASHBOARD_LIMIT),
        }
    }

    // ── Import / export ─────────────────────────────────────────────

    /// All tasks as a pretty-printed JSON array.
    pub fn export_tasks(&self) -> Result<String> {
        Ok(taskbox_tasks::export_tasks(self.tasks.all())?)
    }

    /// Suggested file name for an export made on `date`.
    pub fn export_file_name(date: NaiveDate) -> String {
        export_file_name(date)
    }

    /// Replace all tasks with the contents of an export.
    ///
    /// On error nothing changes. Returns the number of imported tasks.
    pub fn import_tasks(&mut self, json: &str) -> Result<usize> {
        let tasks = parse_import(json)?;
        let count = tasks.len();
        self.tasks.replace_all(tasks);
        info!(count, "tasks imported");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use taskbox_core::{Selector, TaskDraft, TaskStatus};

    use super::*;

    #[test]
    fn in_memory_starts_with_default_view() {
        let tb = TaskBox::in_memory();
        assert!(tb.tasks().is_empty());
        assert_eq!(tb.projects().len(), 1);
        assert_eq!(tb.filter(), &FilterSpec::default());
        assert_eq!(tb.sorting(), SortSpec::default());
    }

    #[test]
    fn open_in_memory_config() {
        let tb = TaskBox::open(&TaskboxConfig::in_memory()).unwrap();
        assert!(tb.projects().default_project().is_default());
    }

    #[test]
    fn config_file_selects_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("data").join("taskbox.db");
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            serde_json::json!({ "dbPath": db.to_string_lossy() }).to_string(),
        )
        .unwrap();

        {
            let mut tb = TaskBox::from_config_file(&config).unwrap();
            let _ = tb.tasks_mut().add(TaskDraft::titled("persisted")).unwrap();
        }
        assert!(db.exists());
        let tb = TaskBox::from_config_file(&config).unwrap();
        assert_eq!(tb.tasks().len(), 1);
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{not json").unwrap();
        assert_matches::assert_matches!(
            TaskBox::from_config_file(&config),
            Err(TaskboxError::Settings(_))
        );
    }

    #[test]
    fn set_filter_merges() {
        let mut tb = TaskBox::in_memory();
        tb.set_filter(FilterPatch {
            status: Some(Selector::Only(TaskStatus::Pending)),
            ..FilterPatch::default()
        });
        tb.set_filter(FilterPatch {
            search: Some("report".to_string()),
            ..FilterPatch::default()
        });
        assert_eq!(tb.filter().status, Selector::Only(TaskStatus::Pending));
        assert_eq!(tb.filter().search, "report");
    }

    #[test]
    fn hidden_completed_tasks_stay_hidden_under_search() {
        let mut tb = TaskBox::in_memory();
        let done = tb.tasks_mut().add(TaskDraft::titled("report done")).unwrap();
        let _ = tb.tasks_mut().toggle_status(&done.id).unwrap();
        let _ = tb.tasks_mut().add(TaskDraft::titled("report draft")).unwrap();
        let _ = tb
            .settings_mut()
            .update(serde_json::json!({"showCompleted": false}))
            .unwrap();
        tb.set_filter(FilterPatch {
            search: Some("REPORT".to_string()),
            ..FilterPatch::default()
        });

        let titles: Vec<_> = tb.visible_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["report draft"]);
    }
}
