//! Write-through repository for the preferences record.

use std::sync::Arc;

use serde_json::Value;
use taskbox_store::{KeyValueStore, SETTINGS_KEY, load_json, save_json};
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::loader::deep_merge;
use crate::types::{NotificationSettings, Settings, Theme, ViewMode};

/// Holds the current [`Settings`] and saves every change to the store.
pub struct SettingsRepository {
    settings: Settings,
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    /// Load the saved record, deep-merged over the defaults.
    ///
    /// A missing, unreadable, or ill-shaped record yields the defaults.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let settings = match load_json::<Value>(store.as_ref(), SETTINGS_KEY) {
            Some(saved) => merged_over(&Settings::default(), saved).unwrap_or_else(|error| {
                warn!(%error, "saved settings are invalid, using defaults");
                Settings::default()
            }),
            None => Settings::default(),
        };
        Self { settings, store }
    }

    /// Current preferences.
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Deep-merge a partial record (camelCase JSON object) into the settings.
    ///
    /// Rejected updates leave the settings unchanged.
    pub fn update(&mut self, partial: Value) -> Result<&Settings> {
        if !partial.is_object() {
            return Err(SettingsError::InvalidValue(
                "settings update must be a JSON object".to_string(),
            ));
        }
        self.settings = merged_over(&self.settings, partial)?;
        debug!("settings updated");
        self.persist();
        Ok(&self.settings)
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        debug!(theme = ?self.settings.theme, "theme toggled");
        self.persist();
        self.settings.theme
    }

    /// Change the task list layout.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.settings.view_mode = mode;
        debug!(view_mode = ?mode, "view mode set");
        self.persist();
    }

    /// Merge a partial notifications object into the current one.
    pub fn update_notifications(&mut self, partial: Value) -> Result<&NotificationSettings> {
        if !partial.is_object() {
            return Err(SettingsError::InvalidValue(
                "notification update must be a JSON object".to_string(),
            ));
        }
        let _ = self.update(serde_json::json!({ "notifications": partial }))?;
        Ok(&self.settings.notifications)
    }

    fn persist(&self) {
        let _ = save_json(self.store.as_ref(), SETTINGS_KEY, &self.settings);
    }
}

fn merged_over(base: &Settings, partial: Value) -> Result<Settings> {
    let merged = deep_merge(serde_json::to_value(base)?, partial);
    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use taskbox_store::MemoryStore;

    use super::*;

    fn fresh() -> (Arc<dyn KeyValueStore>, SettingsRepository) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repo = SettingsRepository::load(Arc::clone(&store));
        (store, repo)
    }

    #[test]
    fn empty_store_yields_defaults() {
        let (_, repo) = fresh();
        assert_eq!(repo.get(), &Settings::default());
    }

    #[test]
    fn partial_saved_record_merges_over_defaults() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
            SETTINGS_KEY,
            r#"{"theme":"dark","notifications":{"beforeDue":1}}"#,
        )]));
        let repo = SettingsRepository::load(store);
        assert_eq!(repo.get().theme, Theme::Dark);
        assert_eq!(repo.get().notifications.before_due, 1);
        assert!(repo.get().notifications.enabled);
        assert!(repo.get().show_completed);
    }

    #[test]
    fn corrupt_saved_record_yields_defaults() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_entries([(SETTINGS_KEY, r#"{"theme":"neon"}"#)]));
        let repo = SettingsRepository::load(store);
        assert_eq!(repo.get(), &Settings::default());
    }

    #[test]
    fn toggle_theme_is_write_through() {
        let (store, mut repo) = fresh();
        assert_eq!(repo.toggle_theme(), Theme::Dark);

        let reloaded = SettingsRepository::load(store);
        assert_eq!(reloaded.get().theme, Theme::Dark);
    }

    #[test]
    fn update_merges_nested_objects() {
        let (_, mut repo) = fresh();
        let settings = repo
            .update(json!({"showCompleted": false, "notifications": {"sound": false}}))
            .unwrap();
        assert!(!settings.show_completed);
        assert!(!settings.notifications.sound);
        assert!(settings.notifications.enabled);
        assert_eq!(settings.notifications.before_due, 24);
    }

    #[test]
    fn invalid_update_leaves_settings_unchanged() {
        let (store, mut repo) = fresh();
        assert_matches!(
            repo.update(json!({"viewMode": "gallery"})),
            Err(SettingsError::Json(_))
        );
        assert_matches!(repo.update(json!(["list"])), Err(SettingsError::InvalidValue(_)));
        assert_eq!(repo.get(), &Settings::default());
        assert_eq!(store.get(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn set_view_mode_persists() {
        let (store, mut repo) = fresh();
        repo.set_view_mode(ViewMode::Kanban);
        let reloaded = SettingsRepository::load(store);
        assert_eq!(reloaded.get().view_mode, ViewMode::Kanban);
    }

    #[test]
    fn update_notifications_keeps_other_fields() {
        let (_, mut repo) = fresh();
        let notifications = repo.update_notifications(json!({"beforeDue": 48})).unwrap();
        assert_eq!(
            notifications,
            &NotificationSettings {
                enabled: true,
                before_due: 48,
                sound: true,
            }
        );
        assert_eq!(repo.get().theme, Theme::Light);
    }

    #[test]
    fn update_notifications_rejects_non_object() {
        let (_, mut repo) = fresh();
        assert_matches!(
            repo.update_notifications(json!(true)),
            Err(SettingsError::InvalidValue(_))
        );
    }
}
