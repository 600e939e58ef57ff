//! File system backend
//!
//! Stores each key as `<root>/<key>.json`. Writes go to a temporary file that
//! is renamed over the target, so a crash never leaves a half-written value.

use log::{debug, error};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::error::StoreError;
use crate::storage::backend::{StorageBackend, check_quota, entry_size};
use crate::storage::validation::validate_key;

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";
const RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    quota: Option<u64>,
}

impl FileBackend {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!("File store opened at {}", root.display());
        Ok(Self { root, quota: None })
    }

    /// Limits keys plus values to `quota` bytes.
    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, VALUE_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, TEMP_EXTENSION))
    }

    /// Lists `(key, path)` for every stored value.
    fn entries(&self) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)?.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push((stem.to_string(), path));
            }
        }
        Ok(entries)
    }

    fn usage_without(&self, key: &str) -> Result<u64, StoreError> {
        let mut usage = 0;
        for (stored_key, path) in self.entries()? {
            if stored_key == key {
                continue;
            }
            let len = fs::metadata(&path)?.len();
            usage += stored_key.len() as u64 + len;
        }
        Ok(usage)
    }
}

/// Removes a file, retrying when the OS reports a transient permission error.
fn remove_with_retries(path: &Path) -> Result<(), StoreError> {
    for attempt in 1..=RETRIES {
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) if attempt < RETRIES && e.kind() == ErrorKind::PermissionDenied => {
                thread::sleep(Duration::from_millis(50 * attempt as u64));
            }
            Err(e) => {
                error!("Failed to remove {}: {}", path.display(), e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.value_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.quota.is_some() {
            check_quota(self.quota, self.usage_without(key)?, key, value)?;
        }

        let temp_path = self.temp_path(key);
        fs::write(&temp_path, value)?;
        if let Err(e) = fs::rename(&temp_path, self.value_path(key)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote {} ({} bytes)", key, entry_size(key, value));
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        remove_with_retries(&self.value_path(key))
    }

    fn clear(&self) -> Result<(), StoreError> {
        for (_, path) in self.entries()? {
            remove_with_retries(&path)?;
        }
        Ok(())
    }
}
