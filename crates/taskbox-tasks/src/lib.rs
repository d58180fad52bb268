//! # taskbox-tasks
//!
//! Write-through repositories for tasks and projects, plus JSON
//! import/export of the task collection.
//!
//! Repositories own their in-memory collection and share the store via
//! `Arc<dyn KeyValueStore>`. Each mutation saves the whole collection under
//! its key (`taskbox_tasks`, `taskbox_projects`). Store failures never
//! surface here; validation and lookup failures do, as [`TaskError`].

#![deny(unsafe_code)]

pub mod errors;
pub mod projects;
pub mod repository;
pub mod transfer;

pub use errors::{Result, TaskError};
pub use projects::ProjectRepository;
pub use repository::TaskRepository;
pub use transfer::{export_file_name, export_tasks, parse_import};
