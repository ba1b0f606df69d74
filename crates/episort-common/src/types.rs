//! Core type definitions for stored uploads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{FileHandle, UserId};

/// How a file arrived, which decides how it has to be sent back.
///
/// Chat platforms reject a video handle passed to the document endpoint and
/// vice versa, so the kind travels with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A generic document upload.
    #[default]
    Document,
    /// A video upload.
    Video,
    /// An audio upload.
    Audio,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Self::Document),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            _ => Err(format!("Invalid media kind: {}", s)),
        }
    }
}

/// A file one user uploaded and that is waiting for the next sort.
///
/// Records are immutable once created. Duplicates (same handle twice) are
/// legal and are kept as separate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// The user the upload belongs to.
    pub owner: UserId,
    /// Handle used to deliver the file again.
    pub handle: FileHandle,
    /// Display name the episode identity is inferred from.
    pub name: String,
    /// Upload kind, selects the delivery call.
    #[serde(default)]
    pub kind: MediaKind,
}

impl FileRecord {
    pub fn new(
        owner: UserId,
        handle: FileHandle,
        name: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            owner,
            handle,
            name: name.into(),
            kind,
        }
    }
}

/// A [`FileRecord`] as persisted, with the row id the store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Monotonic row id; listing order follows it.
    pub id: i64,
    pub record: FileRecord,
}
