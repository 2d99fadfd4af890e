//! Persistent key-value storage with JSON encoding.
//!
//! Every piece of storefront state lives under a named store key holding one
//! JSON document. Backends implement [`KeyValueStore`] over raw strings; the
//! [`StoreExt`] helpers add the JSON layer:
//!
//! - [`StoreExt::load`] never fails. Missing, unreadable or undecodable values
//!   fall back to `T::default()` and are logged at `warn`.
//! - [`StoreExt::save`] overwrites the previous value entirely. There is no
//!   merge.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, used by tests and ephemeral sessions
//! - [`JsonFileStore`] - one `<key>.json` file per key in a data directory

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Store keys used by the storefront.
pub mod keys {
    /// Cart lines (array of cart lines).
    pub const CART_ITEMS: &str = "cartItems";

    /// Registered demo accounts (array of users).
    pub const USERS: &str = "users";

    /// Product staged for the detail page (single product, absent until set).
    pub const SELECTED_PRODUCT: &str = "selectedProduct";

    /// Email of the last successful login.
    pub const LOGGED_IN_USER: &str = "loggedInUser";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be mapped onto the backend.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed, string-valued storage backend.
///
/// Writes are whole-value replacements; implementations must never expose a
/// partially written value to a later `get`.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// JSON helpers available on every [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Load and decode the value under `key`, falling back to the default.
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load_optional(key).unwrap_or_default()
    }

    /// Load and decode the value under `key`, or `None` if it is absent or
    /// cannot be decoded.
    fn load_optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read store key");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable store value");
                None
            }
        }
    }

    /// Encode `value` and overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails, or the backend's
    /// error if the write fails.
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.set(key, json)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        tags: Vec<String>,
        counts: BTreeMap<String, u32>,
    }

    #[test]
    fn test_save_then_load_is_structurally_equal() {
        let mut store = MemoryStore::new();
        let value = Sample {
            name: "mug".to_owned(),
            tags: vec!["kitchen".to_owned(), "gift".to_owned()],
            counts: BTreeMap::from([("p1".to_owned(), 2)]),
        };

        store.save("sample", &value).unwrap();
        let loaded: Sample = store.load("sample");
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_load_missing_key_is_default() {
        let store = MemoryStore::new();
        let loaded: Vec<String> = store.load("nothing-here");
        assert!(loaded.is_empty());
        assert!(store.load_optional::<Sample>("nothing-here").is_none());
    }

    #[test]
    fn test_load_corrupt_value_is_default() {
        let mut store = MemoryStore::new();
        store.set("sample", "not json".to_owned()).unwrap();

        let loaded: Sample = store.load("sample");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_load_wrong_shape_is_default() {
        let mut store = MemoryStore::new();
        store.set("sample", "{\"name\": 42}".to_owned()).unwrap();

        let loaded: Sample = store.load("sample");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_save_overwrites_without_merge() {
        let mut store = MemoryStore::new();
        store.save("list", &vec![1, 2, 3]).unwrap();
        store.save("list", &vec![9]).unwrap();

        let loaded: Vec<i32> = store.load("list");
        assert_eq!(loaded, vec![9]);
    }
}
