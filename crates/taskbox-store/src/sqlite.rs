//! `SQLite`-backed store.
//!
//! All collections share one `kv` table. Each `set` is an upsert of the
//! whole blob, so a write either lands completely or not at all.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::KeyValueStore;
use crate::errors::Result;

/// Run the store migrations.
///
/// Idempotent (uses `IF NOT EXISTS`).
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(KV_SCHEMA)?;
    Ok(())
}

const KV_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Get current UTC timestamp as ISO 8601 string.
fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// [`KeyValueStore`] over a `SQLite` connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(?path, "opening sqlite store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, running migrations first.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _ = self.conn.lock().execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_iso()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _ = self
            .conn
            .lock()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
