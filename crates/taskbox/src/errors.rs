//! Facade error type.

use thiserror::Error;

/// Errors surfaced by [`crate::TaskBox`].
#[derive(Debug, Error)]
pub enum TaskboxError {
    /// Opening the store failed.
    #[error(transparent)]
    Store(#[from] taskbox_store::StoreError),

    /// A task or project operation was rejected.
    #[error(transparent)]
    Task(#[from] taskbox_tasks::TaskError),

    /// A preference update was rejected.
    #[error(transparent)]
    Settings(#[from] taskbox_settings::SettingsError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, TaskboxError>;
