//! Attachment identity and resolved attachment records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric identifier of an attachment stored by the issue tracker.
///
/// Two ids are equal when their numeric values are equal, whatever URL they
/// were extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(u64);

impl AttachmentId {
    /// Creates an id from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Path of the attachment detail page, relative to the site root.
    #[must_use]
    pub fn detail_path(self) -> String {
        format!("/attachments/{}", self.0)
    }
}

impl From<u64> for AttachmentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for AttachmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully resolved attachment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    id: AttachmentId,
    #[serde(default)]
    filename: String,
    content_url: String,
}

impl AttachmentRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(id: AttachmentId, filename: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            content_url: content_url.into(),
        }
    }

    /// Attachment id.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Display filename; may be empty.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// URL the attachment content is downloaded from.
    #[must_use]
    pub fn content_url(&self) -> &str {
        &self.content_url
    }
}
