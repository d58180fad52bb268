//! User preferences persisted under `taskbox_settings`.

use serde::{Deserialize, Serialize};

/// Color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// How the task list is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One row per task.
    #[default]
    List,
    /// Grid of cards.
    Card,
    /// Columns per status.
    Kanban,
}

/// Due-date reminder preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    /// Reminders on or off.
    pub enabled: bool,
    /// Hours before the due date to remind.
    pub before_due: u32,
    /// Play a sound with the reminder.
    pub sound: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            before_due: 24,
            sound: true,
        }
    }
}

/// The preferences record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Color scheme.
    pub theme: Theme,
    /// Task list layout.
    pub view_mode: ViewMode,
    /// UI language tag.
    pub language: String,
    /// Reminder preferences.
    pub notifications: NotificationSettings,
    /// Persist edits without an explicit save.
    pub auto_save: bool,
    /// Include completed tasks in the task list.
    pub show_completed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            view_mode: ViewMode::List,
            language: "zh-CN".to_string(),
            notifications: NotificationSettings::default(),
            auto_save: true,
            show_completed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_wire_format() {
        insta::assert_json_snapshot!(Settings::default(), @r#"
        {
          "theme": "light",
          "viewMode": "list",
          "language": "zh-CN",
          "notifications": {
            "enabled": true,
            "beforeDue": 24,
            "sound": true
          },
          "autoSave": true,
          "showCompleted": true
        }
        "#);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme":"dark","notifications":{"sound":false}}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.notifications.sound);
        assert_eq!(settings.notifications.before_due, 24);
        assert_eq!(settings.language, "zh-CN");
    }

    #[test]
    fn unknown_view_mode_rejected() {
        let result = serde_json::from_str::<Settings>(r#"{"viewMode":"gallery"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
