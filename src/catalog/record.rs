//! File records
//!
//! The metadata entry for one file. No file content is modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::utils::timestamp;

/// Field names the catalog owns; extras with these names are dropped.
pub const RESERVED_FIELDS: [&str; 6] = ["id", "name", "size", "type", "privacy", "uploadDate"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Private => "private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Privacy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "private" => Ok(Privacy::Private),
            other => Err(format!("unknown privacy '{}'", other)),
        }
    }
}

/// A persisted file-metadata record.
///
/// `id` and `upload_date` are assigned by the catalog and never change.
/// Unknown fields found in storage are kept in `extra` and written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(with = "timestamp")]
    pub upload_date: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    pub fn is_public(&self) -> bool {
        self.privacy == Privacy::Public
    }

    pub fn is_private(&self) -> bool {
        self.privacy == Privacy::Private
    }
}

/// What a caller supplies to create a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFile {
    pub name: String,
    pub size: u64,
    pub file_type: Option<String>,
    pub privacy: Option<Privacy>,
    pub extra: Map<String, Value>,
}

impl NewFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    pub fn with_privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    /// Adds a free-form field. Reserved names are ignored when the record is built.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the record with the identity and timestamp the catalog assigned.
    pub(crate) fn into_record(self, id: String, upload_date: DateTime<Utc>) -> FileRecord {
        let mut extra = self.extra;
        extra.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));

        FileRecord {
            id,
            name: self.name,
            size: self.size,
            file_type: self.file_type,
            privacy: self.privacy.unwrap_or_default(),
            upload_date,
            extra,
        }
    }
}
