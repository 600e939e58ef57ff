//! In-memory backend
//!
//! A map behind a mutex. Used by tests and by `backend = "memory"`; nothing
//! survives the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::storage::backend::{StorageBackend, check_quota, entry_size};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that refuses writes once keys plus values would
    /// exceed `quota` bytes.
    pub fn with_quota(quota: u64) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Bytes currently counted against the quota
    pub fn usage(&self) -> Result<u64, StoreError> {
        let items = self.lock()?;
        Ok(items.iter().map(|(k, v)| entry_size(k, v)).sum())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.items.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.lock()?;

        if self.quota.is_some() {
            let usage_without_key: u64 = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| entry_size(k, v))
                .sum();
            check_quota(self.quota, usage_without_key, key, value)?;
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);

        backend.set_item("k", "\"v\"").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("\"v\""));

        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
        backend.remove_item("k").unwrap();
    }

    #[test]
    fn quota_counts_keys_and_values() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("ab", "123456").unwrap();
        assert_eq!(backend.usage().unwrap(), 8);

        let err = backend.set_item("c", "123").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 12, quota: 10, .. }));
        assert_eq!(backend.get_item("c").unwrap(), None);
    }

    #[test]
    fn quota_ignores_the_value_being_replaced() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("ab", "12345678").unwrap();
        backend.set_item("ab", "87654321").unwrap();
        assert_eq!(backend.get_item("ab").unwrap().as_deref(), Some("87654321"));
    }

    #[test]
    fn clear_drops_everything() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_item("b", "2").unwrap();
        assert_eq!(backend.len(), 2);

        backend.clear().unwrap();
        assert!(backend.is_empty());
    }
}
