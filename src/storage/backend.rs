//! Storage backend trait
//!
//! The durable substrate underneath [`KeyValueStore`](super::KeyValueStore).
//! Values are opaque strings; JSON handling lives one layer up.

use crate::error::StoreError;

/// A string-valued key-value substrate.
///
/// Methods take `&self`; implementations use interior mutability so a single
/// backend can be shared by several stores.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw value for `key`, or `None` if it was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// Removes every key.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Bytes an entry counts against a quota: key plus value, like the browser does.
pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Fails with `QuotaExceeded` when `usage_without_key` plus the new entry
/// would not fit in `quota`.
pub(crate) fn check_quota(
    quota: Option<u64>,
    usage_without_key: u64,
    key: &str,
    value: &str,
) -> Result<(), StoreError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let needed = usage_without_key + entry_size(key, value);
    if needed > quota {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}
