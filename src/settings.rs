//! User preferences
//!
//! Persisted separately from the roster, under their own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TOAST_MS, SETTINGS_KEY};
use crate::error::PersistenceError;
use crate::notify::{Notice, ToastPosition};
use crate::platform::KeyValueStorage;

/// Roster UI settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show success toasts at all
    pub toasts: bool,
    /// Corner the toasts appear in
    pub toast_position: ToastPosition,
    /// Auto-dismiss delay
    pub toast_duration_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toasts: true,
            toast_position: ToastPosition::BottomRight,
            toast_duration_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl Settings {
    /// Place a notice per these settings; `None` when toasts are off
    pub fn present(&self, notice: Notice) -> Option<Notice> {
        self.toasts
            .then(|| notice.placed(self.toast_position, self.toast_duration_ms))
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        match storage.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Stored settings are malformed: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn KeyValueStorage) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self).map_err(PersistenceError::Encode)?;
        storage.set_item(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Forget stored settings; the next load yields defaults
    pub fn clear(storage: &mut dyn KeyValueStorage) -> Result<(), PersistenceError> {
        storage.remove_item(SETTINGS_KEY)?;
        log::info!("Settings reset to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(Settings::load(&MemoryStorage::new()), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            toasts: true,
            toast_position: ToastPosition::TopLeft,
            toast_duration_ms: 1500,
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            toasts: false,
            ..Settings::default()
        };
        settings.save(&mut storage).unwrap();
        storage.set_item(crate::consts::ROSTER_KEY, "[]").unwrap();

        Settings::clear(&mut storage).unwrap();
        assert_eq!(storage.peek(SETTINGS_KEY), None);
        assert_eq!(Settings::load(&storage), Settings::default());
        // The roster key is untouched
        assert_eq!(storage.peek(crate::consts::ROSTER_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let storage = MemoryStorage::with_item(SETTINGS_KEY, r#"{"toast_position":"top-right"}"#);
        let settings = Settings::load(&storage);
        assert_eq!(settings.toast_position, ToastPosition::TopRight);
        assert!(settings.toasts);
        assert_eq!(settings.toast_duration_ms, DEFAULT_TOAST_MS);
    }

    #[test]
    fn test_malformed_settings_use_defaults() {
        let storage = MemoryStorage::with_item(SETTINGS_KEY, "{toasts: maybe");
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_present_respects_toggle() {
        let mut settings = Settings::default();
        settings.toast_duration_ms = 900;
        let placed = settings.present(Notice::employee_deleted()).unwrap();
        assert_eq!(placed.duration_ms, 900);

        settings.toasts = false;
        assert_eq!(settings.present(Notice::employee_deleted()), None);
    }
}
