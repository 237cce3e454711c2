//! Attachment resolution error types.

use thiserror::Error;

use crate::domain::entities::AttachmentId;

/// Reasons an attachment candidate could not be resolved.
///
/// These never abort a gallery build; the candidate is dropped and the
/// error logged.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("network error fetching attachment {id}: {message}")]
    Network { id: AttachmentId, message: String },

    #[error("attachment {id} detail page returned HTTP {status}")]
    Status { id: AttachmentId, status: u16 },

    #[error("attachment {id} has no download link")]
    NoDownloadLink { id: AttachmentId },

    #[error("cached entry for attachment {id} is corrupt: {message}")]
    CorruptCache { id: AttachmentId, message: String },

    #[error("session cache I/O failed: {message}")]
    CacheIo { message: String },
}

impl ResolveError {
    /// Creates a network error.
    #[must_use]
    pub fn network(id: AttachmentId, message: impl Into<String>) -> Self {
        Self::Network {
            id,
            message: message.into(),
        }
    }

    /// Creates a corrupt cache error.
    #[must_use]
    pub fn corrupt_cache(id: AttachmentId, message: impl Into<String>) -> Self {
        Self::CorruptCache {
            id,
            message: message.into(),
        }
    }

    /// Creates a cache I/O error.
    #[must_use]
    pub fn cache_io(message: impl Into<String>) -> Self {
        Self::CacheIo {
            message: message.into(),
        }
    }

    /// Returns whether the failure came from the network fetch.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }
}
