//! Small persisted settings for front ends.
//!
//! Values are JSON, keys are flat strings. Readers never fail: an absent or
//! malformed entry falls back to a default and the problem is logged. The
//! color core itself never reads or writes a store.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// File name used by [`JsonFileStore::default_path`].
pub const STORE_FILE_NAME: &str = "store.json";

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store I/O failed for {path}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A value or the backing file is not valid JSON of the expected shape.
    #[error("store holds malformed JSON")]
    Json(#[from] serde_json::Error),
}

/// Raw JSON key-value storage.
pub trait KeyValueStore {
    /// The value under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError>;
    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed helpers available on every [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// The value under `key` decoded as `T`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// The value under `key`, or `fallback` when it is absent or unreadable.
    fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                warn!("Ignoring stored value for `{key}`: {err}");
                fallback
            }
        }
    }

    /// The value under `key`, or `T::default()` when it is absent or
    /// unreadable.
    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get_or(key, T::default())
    }

    /// Encodes `value` and stores it under `key`.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_raw(key, serde_json::to_value(value)?)
    }

    /// Like [`Self::set`], but failures are logged instead of returned.
    fn set_quiet<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.set(key, value) {
            warn!("Failed to store `{key}`: {err}");
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// A store backed by one JSON object in a file.
///
/// The file is read once on open and rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Where the CLI keeps its store, under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("toqan-theme").join(STORE_FILE_NAME))
    }

    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// logged and treated as empty; it is overwritten on the next change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Map<String, Value>>(&text) {
                Ok(values) => values,
                Err(err) => {
                    warn!("Discarding malformed store {}: {err}", path.display());
                    Map::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!("Opened store {} with {} keys", path.display(), values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &Map<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, text).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    // A change is only kept once the file has been written.
    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut values = self.values.write();
        let previous = values.insert(key.to_string(), value);
        if let Err(err) = self.flush(&values) {
            match previous {
                Some(previous) => values.insert(key.to_string(), previous),
                None => values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write();
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush(&values) {
            values.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}

/// A view of another store with every key prefixed by `<scope>.`.
#[derive(Debug)]
pub struct ScopedStore<'a, S: ?Sized> {
    inner: &'a S,
    scope: String,
}

impl<'a, S: KeyValueStore + ?Sized> ScopedStore<'a, S> {
    /// Wraps `inner` under `scope`.
    pub fn new(inner: &'a S, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}.{key}", self.scope)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for ScopedStore<'_, S> {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get_raw(&self.scoped(key))
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.set_raw(&self.scoped(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(&self.scoped(key))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct PanelState {
        open: bool,
        width: u32,
    }

    #[test]
    fn test_memory_store_typed_access() {
        let store = MemoryStore::new();
        assert_eq!(store.get_or_default::<PanelState>("panel"), PanelState::default());

        let state = PanelState {
            open: true,
            width: 320,
        };
        store.set("panel", &state).unwrap();
        assert_eq!(store.get::<PanelState>("panel").unwrap(), Some(state));

        store.remove("panel").unwrap();
        assert_eq!(store.get::<PanelState>("panel").unwrap(), None);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::new();
        store.set_raw("width", Value::String("wide".into())).unwrap();
        assert_eq!(store.get_or("width", 240u32), 240);
        assert!(store.get::<u32>("width").is_err());
    }

    #[test]
    fn test_scoped_keys_do_not_collide() {
        let store = MemoryStore::new();
        let builder = ScopedStore::new(&store, "builder");
        let showcase = ScopedStore::new(&store, "showcase");
        builder.set("selected", "ocean").unwrap();
        showcase.set("selected", "forest").unwrap();

        assert_eq!(builder.get_or_default::<String>("selected"), "ocean");
        assert_eq!(showcase.get_or_default::<String>("selected"), "forest");
        assert_eq!(store.get_or_default::<String>("builder.selected"), "ocean");
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_or_default::<String>("lastSource"), "");
        store.set("lastSource", "#6750a4").unwrap();
        store.set_quiet("sidebarWidth", &280u32);
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get_or_default::<String>("lastSource"), "#6750a4");
        assert_eq!(reopened.get_or("sidebarWidth", 0u32), 280);

        reopened.remove("lastSource").unwrap();
        let again = JsonFileStore::open(&path).unwrap();
        assert_eq!(again.get::<String>("lastSource").unwrap(), None);
    }

    #[test]
    fn test_file_store_keeps_values_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        let store = JsonFileStore::open(&path).unwrap();
        store.set("lastSource", "#6750a4").unwrap();

        // A directory in place of the file makes every flush fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set("lastSource", "#006a6a").is_err());
        assert!(store.set("sidebarWidth", &280u32).is_err());
        assert!(store.remove("lastSource").is_err());

        assert_eq!(store.get_or_default::<String>("lastSource"), "#6750a4");
        assert_eq!(store.get::<u32>("sidebarWidth").unwrap(), None);
    }

    #[test]
    fn test_file_store_recovers_from_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, "[1, 2, 3").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_or("anything", 7u8), 7);
        store.set("fixed", &true).unwrap();
        assert!(JsonFileStore::open(&path).unwrap().get_or("fixed", false));
    }
}
