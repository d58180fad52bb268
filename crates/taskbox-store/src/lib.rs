//! # taskbox-store
//!
//! Key-value blob persistence for the TaskBox collections.
//!
//! Each collection (tasks, projects, settings) is stored as one JSON blob
//! under a fixed key. Backends implement [`KeyValueStore`]:
//!
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`SqliteStore`]: a single `kv` table in a `SQLite` database
//!
//! The [`collection`] helpers add the best-effort semantics the repositories
//! rely on: a failed or corrupt read falls back to the caller's default, a
//! failed write is logged and dropped.

#![deny(unsafe_code)]

pub mod collection;
pub mod errors;
pub mod memory;
pub mod sqlite;

pub use collection::{
    PROJECTS_KEY, SETTINGS_KEY, TASKS_KEY, load_json, load_json_records, read_json, save_json,
    write_json,
};
pub use errors::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, run_migrations};

/// Blob storage keyed by collection name.
///
/// Implementations must be usable behind `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    /// Last value saved under `key`, or `None` if never saved.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
