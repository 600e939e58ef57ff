//! Catalog result types
//!
//! Aggregates computed over the catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::record::{FileRecord, Privacy};
use crate::error::StoreError;
use crate::utils::timestamp;

/// Totals shown on the dashboard stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_files: usize,
    pub total_bytes: u64,
    pub public_files: usize,
    pub private_files: usize,
}

impl CatalogStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                stats.total_files += 1;
                stats.total_bytes = stats.total_bytes.saturating_add(record.size);
                match record.privacy {
                    Privacy::Public => stats.public_files += 1,
                    Privacy::Private => stats.private_files += 1,
                }
                stats
            })
    }
}

/// A dated snapshot of the catalog, written by the admin export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExport {
    pub files: Vec<FileRecord>,
    #[serde(with = "timestamp")]
    pub export_date: DateTime<Utc>,
}

impl CatalogExport {
    pub fn new(files: Vec<FileRecord>, export_date: DateTime<Utc>) -> Self {
        Self { files, export_date }
    }

    /// `liquiddocs-export-YYYY-MM-DD.json`, dated by the export day (UTC)
    pub fn file_name(&self) -> String {
        format!("liquiddocs-export-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    /// Pretty-printed JSON, two-space indented
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Serialize)
    }
}
