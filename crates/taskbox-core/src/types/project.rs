//! Project record and its draft/patch inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

/// ID of the built-in project that can never be deleted.
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Display color used when none is given.
pub const DEFAULT_PROJECT_COLOR: &str = "#1890ff";

/// Name of the seeded default project.
pub const DEFAULT_PROJECT_NAME: &str = "默认项目";

/// Description of the seeded default project.
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "未分类的任务";

fn default_color() -> String {
    DEFAULT_PROJECT_COLOR.to_string()
}

/// A named grouping of tasks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique ID. `"default"` for the built-in project.
    pub id: String,
    /// Non-empty name.
    pub name: String,
    /// Description, may be empty.
    #[serde(default)]
    pub description: String,
    /// Display color hint (hex).
    #[serde(default = "default_color")]
    pub color: String,
    /// Creation instant.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last mutation instant.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// The built-in fallback project.
    ///
    /// Seeded in Chinese to match the default `zh-CN` language setting.
    pub fn default_project(now: DateTime<Utc>) -> Self {
        Self {
            id: DEFAULT_PROJECT_ID.to_string(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            description: DEFAULT_PROJECT_DESCRIPTION.to_string(),
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a new project from a draft with a fresh ID.
    pub fn from_draft(draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id("project"),
            name: draft.name,
            description: draft.description.unwrap_or_default(),
            color: draft.color.unwrap_or_else(default_color),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this is the built-in project.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_PROJECT_ID
    }

    /// Merge a patch into this project and refresh `updated_at`.
    pub fn apply_patch(&mut self, patch: ProjectPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        self.updated_at = now;
    }
}

/// Input for creating a project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    /// Name (required, non-empty).
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Color hint; defaults to [`DEFAULT_PROJECT_COLOR`].
    pub color: Option<String>,
}

impl ProjectDraft {
    /// Draft with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a project. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New color hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_project_has_fixed_id() {
        let project = Project::default_project(Utc::now());
        assert_eq!(project.id, DEFAULT_PROJECT_ID);
        assert!(project.is_default());
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
        assert_eq!(project.name, "默认项目");
        assert_eq!(project.description, "未分类的任务");
    }

    #[test]
    fn from_draft_fills_defaults() {
        let project = Project::from_draft(ProjectDraft::named("Home"), Utc::now());
        assert!(project.id.starts_with("project-"));
        assert!(!project.is_default());
        assert_eq!(project.description, "");
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
    }

    #[test]
    fn apply_patch_keeps_untouched_fields() {
        let now = Utc::now();
        let mut project = Project::from_draft(
            ProjectDraft {
                name: "Work".to_string(),
                description: Some("Office".to_string()),
                color: Some("#ff0000".to_string()),
            },
            now,
        );
        project.apply_patch(
            ProjectPatch {
                color: Some("#00ff00".to_string()),
                ..ProjectPatch::default()
            },
            now,
        );
        assert_eq!(project.name, "Work");
        assert_eq!(project.description, "Office");
        assert_eq!(project.color, "#00ff00");
    }

    #[test]
    fn missing_color_deserializes_to_default() {
        let project: Project =
            serde_json::from_str(r#"{"id": "p1", "name": "Side"}"#).unwrap();
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
    }
}
