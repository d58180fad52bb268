//! Write-through project collection with the built-in default project.

use std::sync::Arc;

use chrono::Utc;
use taskbox_core::{DEFAULT_PROJECT_ID, Project, ProjectDraft, ProjectPatch};
use taskbox_store::{KeyValueStore, PROJECTS_KEY, load_json_records, save_json};
use tracing::{debug, info};

use crate::errors::{Result, TaskError, require};

/// Ordered project collection backed by `taskbox_projects`.
///
/// Always contains the default project, which cannot be deleted. Deleting
/// any other project leaves referencing tasks alone; they resolve to the
/// default project at read time.
pub struct ProjectRepository {
    projects: Vec<Project>,
    store: Arc<dyn KeyValueStore>,
}

impl ProjectRepository {
    /// Load the saved collection, seeding the default project if absent.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut projects: Vec<Project> =
            load_json_records(store.as_ref(), PROJECTS_KEY).unwrap_or_default();
        let seeded = !projects.iter().any(Project::is_default);
        if seeded {
            projects.insert(0, Project::default_project(Utc::now()));
        }
        let repo = Self { projects, store };
        if seeded {
            info!("seeded default project");
            repo.persist();
        }
        repo
    }

    /// All projects in insertion order, default first unless reordered on disk.
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// Project by ID.
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The built-in project.
    pub fn default_project(&self) -> &Project {
        // load() guarantees presence and delete() refuses to remove it
        self.get(DEFAULT_PROJECT_ID).unwrap_or(&self.projects[0])
    }

    /// Project a task reference points at; unset or dangling → default.
    pub fn resolve(&self, project_id: Option<&str>) -> &Project {
        project_id
            .and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_project())
    }

    /// Number of projects, default included.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Always `false`: the default project is never removed.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Create a project from `draft` and append it.
    pub fn add(&mut self, draft: ProjectDraft) -> Result<Project> {
        require("name", &draft.name)?;
        let project = Project::from_draft(draft, Utc::now());
        debug!(project_id = %project.id, "project added");
        self.projects.push(project.clone());
        self.persist();
        Ok(project)
    }

    /// Merge `patch` into the project with `id`.
    pub fn update(&mut self, id: &str, patch: ProjectPatch) -> Result<Project> {
        if let Some(name) = &patch.name {
            require("name", name)?;
        }
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| TaskError::project_not_found(id))?;
        project.apply_patch(patch, Utc::now());
        let updated = project.clone();
        debug!(project_id = %id, "project updated");
        self.persist();
        Ok(updated)
    }

    /// Remove the project with `id`. The default project is never removed.
    ///
    /// Returns whether a project was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        if id == DEFAULT_PROJECT_ID {
            debug!("refusing to delete default project");
            return false;
        }
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let removed = self.projects.len() != before;
        if removed {
            debug!(project_id = %id, "project deleted");
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let _ = save_json(self.store.as_ref(), PROJECTS_KEY, &self.projects);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use taskbox_core::DEFAULT_PROJECT_COLOR;
    use taskbox_store::{MemoryStore, read_json};

    use super::*;

    fn fresh() -> (Arc<dyn KeyValueStore>, ProjectRepository) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = ProjectRepository::load(Arc::clone(&store));
        (store, repo)
    }

    #[test]
    fn empty_store_seeds_and_persists_default() {
        let (store, repo) = fresh();
        assert_eq!(repo.len(), 1);
        let default = repo.default_project();
        assert_eq!(default.id, "default");
        assert_eq!(default.color, DEFAULT_PROJECT_COLOR);

        let saved: Vec<Project> = read_json(store.as_ref(), PROJECTS_KEY).unwrap().unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].is_default());
    }

    #[test]
    fn missing_default_is_reinserted_first() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
            PROJECTS_KEY,
            r#"[{"id":"project-1","name":"Work"}]"#,
        )]));
        let repo = ProjectRepository::load(store);
        let ids: Vec<_> = repo.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["default", "project-1"]);
    }

    #[test]
    fn unreadable_project_is_skipped() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
            PROJECTS_KEY,
            r#"[{"id":"default","name":"Inbox"},{"name":"no id"},{"id":"project-1","name":"Work"}]"#,
        )]));
        let repo = ProjectRepository::load(store);
        let ids: Vec<_> = repo.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["default", "project-1"]);
        assert_eq!(repo.default_project().name, "Inbox");
    }

    #[test]
    fn saved_default_is_kept() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
            PROJECTS_KEY,
            r##"[{"id":"default","name":"Inbox","color":"#ff0000"}]"##,
        )]));
        let repo = ProjectRepository::load(store);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.default_project().name, "Inbox");
    }

    #[test]
    fn add_then_delete() {
        let (store, mut repo) = fresh();
        let work = repo.add(ProjectDraft::named("Work")).unwrap();
        assert!(work.id.starts_with("project-"));
        assert_eq!(repo.len(), 2);

        assert!(!repo.delete("default"));
        assert!(repo.get("default").is_some());

        assert!(repo.delete(&work.id));
        assert!(repo.get(&work.id).is_none());
        assert_eq!(ProjectRepository::load(store).len(), 1);
    }

    #[test]
    fn delete_default_leaves_state_unchanged() {
        let (_, mut repo) = fresh();
        let before = repo.all().to_vec();
        assert!(!repo.delete(DEFAULT_PROJECT_ID));
        assert_eq!(repo.all(), before.as_slice());
    }

    #[test]
    fn add_blank_name_rejected() {
        let (_, mut repo) = fresh();
        assert_matches!(
            repo.add(ProjectDraft::named("")),
            Err(TaskError::Validation(_))
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_changes_fields() {
        let (_, mut repo) = fresh();
        let work = repo.add(ProjectDraft::named("Work")).unwrap();
        let patch = ProjectPatch {
            color: Some("#52c41a".to_string()),
            ..ProjectPatch::default()
        };
        let updated = repo.update(&work.id, patch).unwrap();
        assert_eq!(updated.color, "#52c41a");
        assert_eq!(updated.name, "Work");
    }

    #[test]
    fn update_missing_is_not_found() {
        let (_, mut repo) = fresh();
        assert_matches!(
            repo.update("project-x", ProjectPatch::default()),
            Err(TaskError::NotFound {
                entity: "Project",
                ..
            })
        );
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let (_, mut repo) = fresh();
        let work = repo.add(ProjectDraft::named("Work")).unwrap();
        assert_eq!(repo.resolve(Some(&work.id)).name, "Work");
        assert!(repo.resolve(None).is_default());
        assert!(repo.resolve(Some("project-gone")).is_default());
    }
}
