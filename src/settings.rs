//! Persisted reminder settings and the file-backed store

use std::{fs, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Built-in default interval between reminders, in minutes
pub const DEFAULT_INTERVAL_MINUTES: u64 = 20;

/// Upper bound on the interval, one year in minutes. Keeps every wake-up
/// deadline representable as an instant.
pub const MAX_INTERVAL_MINUTES: u64 = 60 * 24 * 365;

/// Built-in default interval label shown in interval listings
pub const DEFAULT_INTERVAL_LABEL: &str = "20 minutes";

/// Built-in default reminder message
pub const DEFAULT_MESSAGE: &str =
    "Have a look far away from your current screen to protect your beautiful eyes";

/// The persisted settings record - interval, label, message and auto-start flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default = "default_interval_label")]
    pub interval_label: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default)]
    pub auto_start: bool,
}

fn default_interval_minutes() -> u64 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_interval_label() -> String {
    DEFAULT_INTERVAL_LABEL.to_string()
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            interval_label: DEFAULT_INTERVAL_LABEL.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            auto_start: false,
        }
    }
}

impl ReminderSettings {
    /// Normalize a user-supplied message: trimmed, empty falls back to the default
    pub fn normalize_message(text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Reset interval, label and message to the built-in defaults.
    /// The auto-start flag is left untouched.
    pub fn restore_defaults(&mut self) {
        self.interval_minutes = DEFAULT_INTERVAL_MINUTES;
        self.interval_label = DEFAULT_INTERVAL_LABEL.to_string();
        self.message = DEFAULT_MESSAGE.to_string();
    }

    /// Whether the current interval selection is a custom (non-preset) one
    pub fn is_custom_interval(&self) -> bool {
        self.interval_label.starts_with("Custom")
    }
}

/// File-backed store for [`ReminderSettings`]
///
/// Loads fall back to defaults per field when the file is missing or a field
/// is absent; a file that fails to parse at all falls back wholesale. Saves
/// are fatal to nobody - callers log and continue.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default settings location: `<config dir>/look-away/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("look-away")
            .join("settings.json")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the persisted settings, falling back to defaults on any failure
    pub fn load(&self) -> ReminderSettings {
        if !self.path.exists() {
            info!("No settings file at {}, using defaults", self.path.display());
            return ReminderSettings::default();
        }

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read settings from {}: {}, using defaults",
                      self.path.display(), e);
                return ReminderSettings::default();
            }
        };

        match serde_json::from_str::<ReminderSettings>(&data) {
            Ok(mut settings) => {
                // Persisted records may carry an interval outside the range
                // the control surface accepts; clamp rather than stall.
                if settings.interval_minutes < 1 {
                    warn!("Persisted interval was {}, clamping to 1 minute",
                          settings.interval_minutes);
                    settings.interval_minutes = 1;
                } else if settings.interval_minutes > MAX_INTERVAL_MINUTES {
                    warn!("Persisted interval was {}, clamping to {} minutes",
                          settings.interval_minutes, MAX_INTERVAL_MINUTES);
                    settings.interval_minutes = MAX_INTERVAL_MINUTES;
                }
                settings.message = ReminderSettings::normalize_message(&settings.message);
                settings
            }
            Err(e) => {
                warn!("Failed to parse settings from {}: {}, using defaults",
                      self.path.display(), e);
                ReminderSettings::default()
            }
        }
    }

    /// Persist the settings record, creating the parent directory if needed
    pub fn save(&self, settings: &ReminderSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(settings)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_preserves_all_fields() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let original = ReminderSettings {
            interval_minutes: 45,
            interval_label: "Custom (45 min)".to_string(),
            message: "Blink now".to_string(),
            auto_start: true,
        };
        store.save(&original).unwrap();

        let reloaded = SettingsStore::new(store.path().clone()).load();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load(), ReminderSettings::default());
    }

    #[test]
    fn missing_fields_fall_back_independently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"interval_minutes": 45}"#).unwrap();

        let settings = SettingsStore::new(path).load();
        assert_eq!(settings.interval_minutes, 45);
        assert_eq!(settings.interval_label, DEFAULT_INTERVAL_LABEL);
        assert_eq!(settings.message, DEFAULT_MESSAGE);
        assert!(!settings.auto_start);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert_eq!(SettingsStore::new(path).load(), ReminderSettings::default());
    }

    #[test]
    fn zero_interval_is_clamped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"interval_minutes": 0}"#).unwrap();

        assert_eq!(SettingsStore::new(path).load().interval_minutes, 1);
    }

    #[test]
    fn oversized_interval_is_clamped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let record = format!(r#"{{"interval_minutes": {}}}"#, u64::MAX);
        std::fs::write(&path, record).unwrap();

        assert_eq!(
            SettingsStore::new(path).load().interval_minutes,
            MAX_INTERVAL_MINUTES
        );
    }

    #[test]
    fn normalize_message_trims_and_falls_back() {
        assert_eq!(ReminderSettings::normalize_message(""), DEFAULT_MESSAGE);
        assert_eq!(ReminderSettings::normalize_message("   "), DEFAULT_MESSAGE);
        assert_eq!(ReminderSettings::normalize_message("  Blink now  "), "Blink now");
    }

    #[test]
    fn custom_label_is_a_distinct_category() {
        let mut settings = ReminderSettings::default();
        assert!(!settings.is_custom_interval());
        settings.interval_label = "Custom (7 min)".to_string();
        assert!(settings.is_custom_interval());
    }

    #[test]
    fn restore_defaults_keeps_auto_start() {
        let mut settings = ReminderSettings {
            interval_minutes: 5,
            interval_label: "5 minutes".to_string(),
            message: "custom".to_string(),
            auto_start: true,
        };
        settings.restore_defaults();
        assert_eq!(settings.interval_minutes, DEFAULT_INTERVAL_MINUTES);
        assert_eq!(settings.message, DEFAULT_MESSAGE);
        assert!(settings.auto_start);
    }
}
