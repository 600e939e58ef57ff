//! Catalog views
//!
//! The named filters the dashboards offer.

use std::fmt;

/// How many records the `recent` view returns
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFilter {
    #[default]
    All,
    Public,
    Private,
    Recent,
}

impl FileFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFilter::All => "all",
            FileFilter::Public => "public",
            FileFilter::Private => "private",
            FileFilter::Recent => "recent",
        }
    }
}

/// Any name other than `public`, `private` or `recent` selects everything.
impl From<&str> for FileFilter {
    fn from(name: &str) -> Self {
        match name {
            "public" => FileFilter::Public,
            "private" => FileFilter::Private,
            "recent" => FileFilter::Recent,
            _ => FileFilter::All,
        }
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
