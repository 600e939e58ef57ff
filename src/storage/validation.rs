//! Key validation
//!
//! Keys become file names in the file backend, so they are restricted to a
//! safe character set.

use crate::error::StoreError;

/// Maximum key length accepted by the file backend
pub const MAX_KEY_LENGTH: usize = 128;

/// Checks that a key is usable as a file name stem.
///
/// Allowed: ASCII alphanumerics, `-`, `_` and `.`, not starting with `.`.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
