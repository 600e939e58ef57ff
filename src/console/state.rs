//! Module `state`
//!
//! The objects one console session drives, all sharing a single store.

use crate::catalog::FileCatalog;
use crate::preferences::Preferences;
use crate::session::SessionRegistry;
use crate::storage::KeyValueStore;

pub struct Console {
    pub(crate) catalog: FileCatalog,
    pub(crate) session: SessionRegistry,
    pub(crate) preferences: Preferences,
}

impl Console {
    pub fn new(store: KeyValueStore) -> Self {
        Self {
            catalog: FileCatalog::new(store.clone()),
            session: SessionRegistry::new(store.clone()),
            preferences: Preferences::new(store),
        }
    }

    pub fn catalog(&mut self) -> &mut FileCatalog {
        &mut self.catalog
    }

    pub fn session(&mut self) -> &mut SessionRegistry {
        &mut self.session
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}
