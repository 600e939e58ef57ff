//! Catalog operations
//!
//! Every access first reloads the collection from the store, so changes made
//! through another catalog over the same backend are picked up. Every mutation
//! writes the whole collection back: two writers racing on one backend lose
//! updates at collection granularity, the last write wins.
//!
//! Stored entries that are not valid records are skipped on load and written
//! back untouched at their original positions.

use log::{debug, info, warn};
use serde_json::Value;

use crate::catalog::filter::{FileFilter, RECENT_LIMIT};
use crate::catalog::id::new_record_id;
use crate::catalog::record::{FileRecord, NewFile, Privacy};
use crate::catalog::results::{CatalogExport, CatalogStats};
use crate::error::StoreError;
use crate::storage::{KeyValueStore, keys};
use crate::utils::timestamp;

pub struct FileCatalog {
    store: KeyValueStore,
    files: Vec<FileRecord>,
    /// Unreadable entries with their index in the stored array
    skipped: Vec<(usize, Value)>,
}

impl FileCatalog {
    pub fn new(store: KeyValueStore) -> Self {
        let mut catalog = Self {
            store,
            files: Vec::new(),
            skipped: Vec::new(),
        };
        catalog.reload();
        catalog
    }

    // --------------------
    // Persistence
    // --------------------

    fn try_reload(&mut self) -> Result<(), StoreError> {
        let entries = self
            .store
            .try_get::<Vec<Value>>(keys::FILES)?
            .unwrap_or_default();

        self.files.clear();
        self.skipped.clear();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<FileRecord>(entry.clone()) {
                Ok(record) => self.files.push(record),
                Err(e) => {
                    warn!("Skipping unreadable file entry {}: {}", index, e);
                    self.skipped.push((index, entry));
                }
            }
        }
        debug!(
            "Catalog reloaded: {} records, {} skipped",
            self.files.len(),
            self.skipped.len()
        );
        Ok(())
    }

    /// Reloads, treating an unreadable collection as empty.
    ///
    /// Returns false in that case; the caller must not write the empty
    /// collection over what is stored.
    fn reload(&mut self) -> bool {
        match self.try_reload() {
            Ok(()) => true,
            Err(e) => {
                warn!("Catalog unreadable, showing it empty: {}", e);
                self.files.clear();
                self.skipped.clear();
                false
            }
        }
    }

    fn try_persist(&self) -> Result<(), StoreError> {
        let mut entries = self
            .files
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(StoreError::Serialize)?;
        for (index, entry) in &self.skipped {
            entries.insert((*index).min(entries.len()), entry.clone());
        }
        self.store.try_set(keys::FILES, &entries)
    }

    fn id_taken(&self, id: &str) -> bool {
        self.files.iter().any(|f| f.id == id)
            || self
                .skipped
                .iter()
                .any(|(_, entry)| entry.get("id").and_then(Value::as_str) == Some(id))
    }

    fn unique_id(&self) -> String {
        let mut id = new_record_id();
        while self.id_taken(&id) {
            id = new_record_id();
        }
        id
    }

    // --------------------
    // Reads
    // --------------------

    /// All records in insertion order.
    pub fn get_all(&mut self) -> &[FileRecord] {
        self.reload();
        &self.files
    }

    pub fn try_get_all(&mut self) -> Result<&[FileRecord], StoreError> {
        self.try_reload()?;
        Ok(&self.files)
    }

    pub fn get(&mut self, id: &str) -> Option<&FileRecord> {
        self.reload();
        self.files.iter().find(|f| f.id == id)
    }

    /// Records whose name contains `query`, ignoring case. An empty query
    /// matches every record.
    pub fn search(&mut self, query: &str) -> Vec<&FileRecord> {
        self.reload();
        let needle = query.to_lowercase();
        self.files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Applies a named view. Never reorders the stored collection.
    pub fn filter(&mut self, filter: impl Into<FileFilter>) -> Vec<&FileRecord> {
        match filter.into() {
            FileFilter::Public => self.with_privacy(Privacy::Public),
            FileFilter::Private => self.with_privacy(Privacy::Private),
            FileFilter::Recent => self.recent(RECENT_LIMIT),
            FileFilter::All => self.get_all().iter().collect(),
        }
    }

    /// Up to `limit` records, newest upload first. Records uploaded in the
    /// same millisecond keep their insertion order.
    pub fn recent(&mut self, limit: usize) -> Vec<&FileRecord> {
        self.reload();
        let mut records: Vec<&FileRecord> = self.files.iter().collect();
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        records.truncate(limit);
        records
    }

    fn with_privacy(&mut self, privacy: Privacy) -> Vec<&FileRecord> {
        self.reload();
        self.files.iter().filter(|f| f.privacy == privacy).collect()
    }

    pub fn stats(&mut self) -> CatalogStats {
        CatalogStats::from_records(self.get_all())
    }

    /// Snapshot of every record, stamped with the export time.
    pub fn export(&mut self) -> CatalogExport {
        CatalogExport::new(self.get_all().to_vec(), timestamp::now())
    }

    pub fn try_export(&mut self) -> Result<CatalogExport, StoreError> {
        let files = self.try_get_all()?.to_vec();
        Ok(CatalogExport::new(files, timestamp::now()))
    }

    // --------------------
    // Mutations
    // --------------------

    /// Creates a record and persists the catalog.
    ///
    /// The new record is returned even when it could not be written; it is
    /// then gone on the next access. Use [`try_add`](Self::try_add) to find out.
    /// Nothing is written while the stored collection is unreadable.
    pub fn add(&mut self, new_file: NewFile) -> FileRecord {
        let readable = self.reload();
        let record = new_file.into_record(self.unique_id(), timestamp::now());

        if !readable {
            warn!("File '{}' was not persisted: catalog unreadable", record.name);
        } else if let Err(e) = self.insert(record.clone()) {
            warn!("File '{}' was not persisted: {}", record.name, e);
        }
        record
    }

    pub fn try_add(&mut self, new_file: NewFile) -> Result<FileRecord, StoreError> {
        self.try_reload()?;
        let record = new_file.into_record(self.unique_id(), timestamp::now());
        self.insert(record.clone())?;
        Ok(record)
    }

    fn insert(&mut self, record: FileRecord) -> Result<(), StoreError> {
        let (id, name) = (record.id.clone(), record.name.clone());
        self.files.push(record);

        if let Err(e) = self.try_persist() {
            self.files.pop();
            return Err(e);
        }

        info!("Added file '{}' ({})", name, id);
        Ok(())
    }

    /// Deletes the record with `id`. Returns whether a record was removed
    /// and stored; a missing id is not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.reload() {
            warn!("Removal of {} skipped: catalog unreadable", id);
            return false;
        }
        self.remove_loaded(id).unwrap_or_else(|e| {
            warn!("Removal of {} was not persisted: {}", id, e);
            false
        })
    }

    pub fn try_remove(&mut self, id: &str) -> Result<bool, StoreError> {
        self.try_reload()?;
        self.remove_loaded(id)
    }

    fn remove_loaded(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        if self.files.len() == before {
            debug!("Remove: no file with id {}", id);
            return Ok(false);
        }

        self.try_persist()?;
        info!("Removed file {}", id);
        Ok(true)
    }

    /// Changes the privacy of the record with `id`. Returns whether a record
    /// was changed and stored; a missing id is not an error.
    pub fn update_privacy(&mut self, id: &str, privacy: Privacy) -> bool {
        if !self.reload() {
            warn!("Privacy change of {} skipped: catalog unreadable", id);
            return false;
        }
        self.update_privacy_loaded(id, privacy).unwrap_or_else(|e| {
            warn!("Privacy change of {} was not persisted: {}", id, e);
            false
        })
    }

    pub fn try_update_privacy(&mut self, id: &str, privacy: Privacy) -> Result<bool, StoreError> {
        self.try_reload()?;
        self.update_privacy_loaded(id, privacy)
    }

    fn update_privacy_loaded(&mut self, id: &str, privacy: Privacy) -> Result<bool, StoreError> {
        let Some(file) = self.files.iter_mut().find(|f| f.id == id) else {
            debug!("Update privacy: no file with id {}", id);
            return Ok(false);
        };
        file.privacy = privacy;

        self.try_persist()?;
        info!("File {} is now {}", id, privacy);
        Ok(true)
    }
}
