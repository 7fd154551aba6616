//! A small file-backed key-value store, one JSON document per key.
//!
//! Writes go through a sibling temp file and a rename, so a crash mid-write
//! leaves the previous document intact.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key `{key}`")]
    InvalidKey { key: String },
    #[error("could not create store directory `{path}`: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read key `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("could not write key `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("could not encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not decode value for key `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A key-value store rooted at one directory, `<key>.json` per key.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the root directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|source| StoreError::CreateRoot { path: root.clone(), source })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys name files, so only lowercase alphanumerics, `-`, and `_` are
    /// allowed.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
        if !valid {
            return Err(StoreError::InvalidKey { key: key.to_string() });
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.is_file())
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { key: key.to_string(), source }),
        }
    }

    pub fn put_raw(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, raw)
            .map_err(|source| StoreError::Write { key: key.to_string(), source })?;
        fs::rename(&staging, &path)
            .map_err(|source| StoreError::Write { key: key.to_string(), source })?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|source| StoreError::Decode { key: key.to_string(), source })?;
        Ok(Some(value))
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Encode { key: key.to_string(), source })?;
        self.put_raw(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[test]
    fn missing_keys_read_as_none() {
        let (_dir, store) = store();

        assert_eq!(store.get_raw("missing").expect("readable"), None);
        assert!(!store.contains("missing").expect("checkable"));
    }

    #[test]
    fn values_round_trip() {
        let (_dir, store) = store();

        store.put("greeting", &"hello".to_string()).expect("writable");
        let value: Option<String> = store.get("greeting").expect("readable");
        assert_eq!(value.as_deref(), Some("hello"));
        assert!(store.contains("greeting").expect("checkable"));
    }

    #[test]
    fn writes_leave_no_staging_file_behind() {
        let (dir, store) = store();

        store.put_raw("greeting", "{}").expect("writable");

        let staged: Vec<_> = fs::read_dir(dir.path())
            .expect("readable dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(staged.is_empty());
    }

    #[test]
    fn malformed_documents_surface_a_decode_error() {
        let (_dir, store) = store();
        store.put_raw("broken", "not json {").expect("writable");

        let result: Result<Option<u32>, _> = store.get("broken");
        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn hostile_keys_are_rejected() {
        let (_dir, store) = store();

        for key in ["", "../escape", "UPPER", "has space", "dot.dot"] {
            let result = store.get_raw(key);
            assert!(matches!(result, Err(StoreError::InvalidKey { .. })), "key {key:?}");
        }
    }

    #[test]
    fn open_creates_nested_roots() {
        let dir = TempDir::new().expect("create temp dir");
        let nested = dir.path().join("a").join("b");

        let store = FileStore::open(&nested).expect("open store");
        store.put_raw("key", "{}").expect("writable");
        assert!(nested.join("key.json").is_file());
    }
}
