//! Typed JSON access to the named collections.
//!
//! [`read_json`]/[`write_json`] surface every failure. [`load_json`] and
//! [`save_json`] are the best-effort variants the repositories use: read
//! failures log a warning and yield `None` (callers substitute defaults),
//! write failures log a warning and are otherwise dropped, leaving the
//! caller's in-memory state as the source of truth.
//! [`load_json_records`] reads array collections one record at a time, so a
//! single unreadable record is skipped instead of discarding the rest.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::KeyValueStore;
use crate::errors::Result;

/// Key of the task collection (JSON array of tasks).
pub const TASKS_KEY: &str = "taskbox_tasks";

/// Key of the project collection (JSON array of projects).
pub const PROJECTS_KEY: &str = "taskbox_projects";

/// Key of the settings record (JSON object).
pub const SETTINGS_KEY: &str = "taskbox_settings";

/// Read and decode the value under `key`. `Ok(None)` if never saved.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` and save it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Best-effort read: `None` when missing, unreadable, or corrupt.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match read_json(store, key) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            debug!(key, "collection not found, using defaults");
            None
        }
        Err(error) => {
            warn!(key, %error, "failed to load collection, using defaults");
            None
        }
    }
}

/// Best-effort read of an array collection, decoding each record on its own.
///
/// Records that do not decode as `T` are logged with their index and
/// skipped. `None` only when the blob is missing, unreadable, or not an
/// array.
pub fn load_json_records<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<Vec<T>> {
    let raw: Vec<Value> = load_json(store, key)?;
    let mut records = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(error) => warn!(key, index, %error, "skipping unreadable record"),
        }
    }
    Some(records)
}

/// Best-effort write: failures are logged and dropped.
///
/// Returns whether the write landed, for callers that want to report it.
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match write_json(store, key, value) {
        Ok(()) => true,
        Err(error) => {
            warn!(key, %error, "failed to save collection");
            false
        }
    }
}
