//! Config loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TaskboxConfig::default()`]
//! 2. If `~/.taskbox/config.json` exists, deep-merge user values over defaults
//! 3. Apply `TASKBOX_*` environment variable overrides (highest priority)
//!
//! Deep merge rules (shared with preference updates):
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::TaskboxConfig;

/// Env var overriding [`TaskboxConfig::db_path`].
pub const ENV_DB_PATH: &str = "TASKBOX_DB_PATH";
/// Env var overriding [`TaskboxConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "TASKBOX_LOG_LEVEL";
/// Env var overriding [`TaskboxConfig::log_json`].
pub const ENV_LOG_JSON: &str = "TASKBOX_LOG_JSON";

/// Per-user data directory (`~/.taskbox`).
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskbox")
}

/// Resolve the path to the config file (`~/.taskbox/config.json`).
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Load config from the default path with env var overrides.
pub fn load_config() -> Result<TaskboxConfig> {
    load_config_from_path(&config_path())
}

/// Load config from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_config_from_path(path: &Path) -> Result<TaskboxConfig> {
    let mut config = load_file_layer(path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn load_file_layer(path: &Path) -> Result<TaskboxConfig> {
    let defaults = serde_json::to_value(TaskboxConfig::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading config from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "config file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TASKBOX_*` environment variable overrides.
///
/// Invalid values are logged and ignored (falling back to file/default).
pub fn apply_env_overrides(config: &mut TaskboxConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

/// [`apply_env_overrides`] over an arbitrary variable lookup.
pub fn apply_overrides<F>(config: &mut TaskboxConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = read_string(&lookup, ENV_DB_PATH) {
        config.db_path = v;
    }
    if let Some(v) = read_log_level(&lookup, ENV_LOG_LEVEL) {
        config.log_level = v;
    }
    if let Some(v) = read_bool(&lookup, ENV_LOG_JSON) {
        config.log_json = v;
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a `tracing` level name, normalized to lowercase.
pub fn parse_log_level(val: &str) -> Option<String> {
    let level = val.trim().to_lowercase();
    matches!(
        level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
    .then_some(level)
}

// ── Variable readers ────────────────────────────────────────────────────────

fn read_string<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.is_empty())
}

fn read_bool<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<bool> {
    let val = lookup(name)?;
    let result = parse_bool(&val);
    if result.is_none() {
        warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_log_level<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<String> {
    let val = lookup(name)?;
    let result = parse_log_level(&val);
    if result.is_none() {
        warn!(key = name, value = %val, "invalid log level env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use taskbox_core::logging::capture_logs;
    use tracing::Level;

    use super::*;
    use crate::errors::SettingsError;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"notifications": {"enabled": true, "beforeDue": 24}});
        let source = serde_json::json!({"notifications": {"beforeDue": 2}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["notifications"]["beforeDue"], 2);
        assert_eq!(merged["notifications"]["enabled"], true);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4]});
        assert_eq!(deep_merge(target, source)["items"], serde_json::json!([4]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_new_keys_added() {
        let merged = deep_merge(serde_json::json!({"a": 1}), serde_json::json!({"b": 2}));
        assert_eq!(merged, serde_json::json!({"a": 1, "b": 2}));
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let merged = deep_merge(target, serde_json::json!({"a": 42}));
        assert_eq!(merged["a"], 42);
    }

    // ── load_config_from_path ───────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let config = load_file_layer(Path::new("/nonexistent/config.json")).unwrap();
        assert_eq!(config, TaskboxConfig::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"logLevel": "debug"}"#).unwrap();

        let config = load_file_layer(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.db_path, TaskboxConfig::default().db_path);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not valid json").unwrap();

        assert_matches!(load_config_from_path(&path), Err(SettingsError::Json(_)));
    }

    #[test]
    fn load_wrong_type_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"logJson": "sometimes"}"#).unwrap();

        assert_matches!(load_file_layer(&path), Err(SettingsError::Json(_)));
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn overrides_win_over_file() {
        let mut config = TaskboxConfig::default();
        apply_overrides(
            &mut config,
            vars(&[
                (ENV_DB_PATH, "/data/tasks.db"),
                (ENV_LOG_LEVEL, "INFO"),
                (ENV_LOG_JSON, "yes"),
            ]),
        );
        assert_eq!(config.db_path, "/data/tasks.db");
        assert_eq!(config.log_level, "info");
        assert!(config.log_json);
    }

    #[test]
    fn empty_db_path_ignored() {
        let mut config = TaskboxConfig::default();
        apply_overrides(&mut config, vars(&[(ENV_DB_PATH, "")]));
        assert_eq!(config.db_path, TaskboxConfig::default().db_path);
    }

    #[test]
    fn invalid_override_warns_and_keeps_value() {
        let (logs, _guard) = capture_logs();
        let mut config = TaskboxConfig::default();
        apply_overrides(&mut config, vars(&[(ENV_LOG_LEVEL, "loud")]));
        assert_eq!(config.log_level, "warn");
        assert!(logs.has_event(Level::WARN, "invalid log level env var"));
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_bool_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "On"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
        for val in &["false", "0", "no", "off", "No"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn parse_log_level_variants() {
        assert_eq!(parse_log_level("Debug").as_deref(), Some("debug"));
        assert_eq!(parse_log_level(" error ").as_deref(), Some("error"));
        assert_eq!(parse_log_level("verbose"), None);
    }
}
