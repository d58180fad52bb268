//! Settings error types.

use thiserror::Error;

/// Errors from loading configuration or applying preference updates.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the config file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid JSON, or JSON that does not fit the settings shape.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A value was rejected (e.g. a non-object partial update).
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
