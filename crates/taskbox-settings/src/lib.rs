//! # taskbox-settings
//!
//! User preferences and process configuration for TaskBox.
//!
//! - [`Settings`]: the preferences record (theme, view mode, language,
//!   notifications, ...) persisted under `taskbox_settings` and managed by
//!   [`SettingsRepository`]. Updates deep-merge partial JSON.
//! - [`TaskboxConfig`]: where the database lives and how to log. Loaded from
//!   three layers (in priority order):
//!   1. **Compiled defaults**: [`TaskboxConfig::default()`]
//!   2. **User file**: `~/.taskbox/config.json` (deep-merged over defaults)
//!   3. **Environment variables**: `TASKBOX_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod repository;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{config_path, data_dir, deep_merge, load_config, load_config_from_path};
pub use repository::SettingsRepository;
pub use types::*;
