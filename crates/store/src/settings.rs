//! Persistence for shop settings.
//!
//! Settings live under a single fixed key. Loading never fails: a missing,
//! unreadable, or invalid blob falls back to the default settings, and the
//! fallback is logged rather than surfaced.

use std::path::PathBuf;

use bonbon_core::settings::PosSettings;

use crate::kv::{FileStore, StoreError};

/// The key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "bonbon-pos-settings";

#[derive(Debug)]
pub struct SettingsStore {
    store: FileStore,
}

impl SettingsStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self { store: FileStore::open(root)? })
    }

    pub fn from_store(store: FileStore) -> Self {
        Self { store }
    }

    /// Whether a settings blob has been written.
    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        self.store.contains(SETTINGS_KEY)
    }

    /// Loads settings, falling back to defaults when nothing usable is
    /// stored.
    pub fn load(&self) -> PosSettings {
        match self.store.get::<PosSettings>(SETTINGS_KEY) {
            Ok(Some(settings)) => match settings.validate() {
                Ok(()) => settings,
                Err(error) => {
                    tracing::warn!(
                        event_name = "settings.invalid_blob",
                        error = %error,
                        "stored settings failed validation, using defaults"
                    );
                    PosSettings::default()
                }
            },
            Ok(None) => {
                tracing::debug!(event_name = "settings.not_found", "no stored settings, using defaults");
                PosSettings::default()
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "settings.unreadable_blob",
                    error = %error,
                    "stored settings are unreadable, using defaults"
                );
                PosSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PosSettings) -> Result<(), StoreError> {
        self.store.put(SETTINGS_KEY, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn settings_store() -> (TempDir, SettingsStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = SettingsStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[test]
    fn loading_an_empty_store_yields_defaults() {
        let (_dir, store) = settings_store();

        assert!(!store.is_initialized().expect("checkable"));
        assert_eq!(store.load(), PosSettings::default());
    }

    #[test]
    fn saved_settings_round_trip() {
        let (_dir, store) = settings_store();

        let mut settings = PosSettings::default();
        settings.business_name = "Bonbon at the Pier".to_string();
        settings.tax_rate = Decimal::from(10);
        store.save(&settings).expect("writable");

        assert!(store.is_initialized().expect("checkable"));
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn malformed_blobs_fall_back_to_defaults() {
        let (_dir, store) = settings_store();
        store.store.put_raw(SETTINGS_KEY, "{ this is not json").expect("writable");

        assert_eq!(store.load(), PosSettings::default());
    }

    #[test]
    fn invalid_blobs_fall_back_to_defaults() {
        let (_dir, store) = settings_store();

        let mut settings = PosSettings::default();
        settings.tax_rate = Decimal::from(500);
        store.store.put(SETTINGS_KEY, &settings).expect("writable");

        assert_eq!(store.load(), PosSettings::default());
    }

    #[test]
    fn partial_blobs_keep_their_fields_and_default_the_rest() {
        let (_dir, store) = settings_store();
        store.store.put_raw(SETTINGS_KEY, "{\"taxRate\": 12}").expect("writable");

        let settings = store.load();
        assert_eq!(settings.tax_rate, Decimal::from(12));
        assert_eq!(settings.business_name, PosSettings::default().business_name);
        assert_eq!(settings.gift_box_settings.sizes.len(), 4);
    }
}
