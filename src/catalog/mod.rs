//! File catalog
//!
//! An ordered collection of file-metadata records persisted as one JSON array.

pub mod filter;
pub mod id;
pub mod operations;
pub mod record;
pub mod results;

pub use filter::{FileFilter, RECENT_LIMIT};
pub use operations::FileCatalog;
pub use record::{FileRecord, NewFile, Privacy};
pub use results::{CatalogExport, CatalogStats};
