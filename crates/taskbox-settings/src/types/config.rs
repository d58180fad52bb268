//! Process configuration (where data lives, how much to log).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Database path that selects the in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Configuration for opening a TaskBox.
///
/// Loaded from `~/.taskbox/config.json` with `TASKBOX_*` environment
/// overrides; see [`crate::loader`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskboxConfig {
    /// `SQLite` database file, or [`IN_MEMORY_DB`].
    pub db_path: String,
    /// Default `tracing` filter directive.
    pub log_level: String,
    /// Emit JSON log lines instead of compact text.
    pub log_json: bool,
}

impl TaskboxConfig {
    /// Config for an ephemeral in-memory TaskBox.
    pub fn in_memory() -> Self {
        Self {
            db_path: IN_MEMORY_DB.to_string(),
            ..Self::default()
        }
    }

    /// Whether [`Self::db_path`] selects the in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }

    /// [`Self::db_path`] as a filesystem path.
    pub fn db_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.db_path)
    }
}

impl Default for TaskboxConfig {
    fn default() -> Self {
        Self {
            db_path: crate::loader::data_dir()
                .join("taskbox.db")
                .to_string_lossy()
                .into_owned(),
            log_level: "warn".to_string(),
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_lives_in_data_dir() {
        let config = TaskboxConfig::default();
        assert!(config.db_path.ends_with("taskbox.db"));
        assert!(config.db_path.contains(".taskbox"));
        assert!(!config.is_in_memory());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn in_memory_config() {
        let config = TaskboxConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.db_path, ":memory:");
    }

    #[test]
    fn camel_case_fields() {
        let config: TaskboxConfig =
            serde_json::from_str(r#"{"dbPath":"/tmp/t.db","logJson":true}"#).unwrap();
        assert_eq!(config.db_path, "/tmp/t.db");
        assert!(config.log_json);
        assert_eq!(config.log_level, "warn");
    }
}
