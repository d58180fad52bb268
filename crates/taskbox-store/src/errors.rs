//! Store error types.

use thiserror::Error;

/// Errors from store backends and JSON (de)serialization of collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored blob was not valid JSON for the expected type, or a value
    /// could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err = StoreError::from(json_err);
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn database_from_rusqlite() {
        let sqlite_err =
            rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some("test".to_string()));
        let err = StoreError::from(sqlite_err);
        assert!(err.to_string().contains("Database error"));
    }

    #[test]
    fn unavailable_display() {
        let err = StoreError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Store unavailable: quota exceeded");
    }
}
