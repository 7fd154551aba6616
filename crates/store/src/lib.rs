pub mod kv;
pub mod settings;

pub use kv::{FileStore, StoreError};
pub use settings::{SettingsStore, SETTINGS_KEY};
