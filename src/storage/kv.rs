//! JSON key-value store
//!
//! Serializes values to JSON on top of a [`StorageBackend`]. The plain methods
//! never fail: unreadable values read as `None` and failed writes report
//! `false`. The `try_*` methods expose the underlying [`StoreError`].

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::StoreError;
use crate::storage::backend::StorageBackend;
use crate::storage::memory::MemoryBackend;

/// Cloneable handle to a shared backend.
#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
}

impl KeyValueStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A store over a fresh [`MemoryBackend`]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Reads and parses `key`. A stored JSON `null` reads as `None`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };

        serde_json::from_str::<Option<T>>(&raw).map_err(|source| StoreError::Deserialize {
            key: key.to_string(),
            source,
        })
    }

    /// Reads `key`, treating every failure as absence.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring unreadable value for '{}': {}", key, e);
                None
            }
        }
    }

    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(StoreError::Serialize)?;
        self.backend.set_item(key, &raw)?;
        debug!("Stored '{}' ({} bytes)", key, raw.len());
        Ok(())
    }

    /// Serializes and stores `value`; returns whether it was written.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to store '{}': {}", key, e);
                false
            }
        }
    }

    pub fn try_remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(key)
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            warn!("Failed to remove '{}': {}", key, e);
        }
    }

    pub fn try_clear(&self) -> Result<(), StoreError> {
        self.backend.clear()
    }

    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            warn!("Failed to clear store: {}", e);
        }
    }

    /// Reads a text value stored either JSON-encoded (`"light"`) or bare
    /// (`light`), as older writers store plain strings unencoded.
    pub fn get_text(&self, key: &str) -> Option<String> {
        let raw = match self.backend.get_item(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Ignoring unreadable value for '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::String(text)) => Some(text),
            Ok(Value::Null) => None,
            Ok(_) | Err(_) => Some(raw),
        }
    }

    /// Writes a raw string, bypassing JSON serialization.
    #[cfg(test)]
    pub(crate) fn set_raw(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.backend.set_item(key, raw)
    }
}
