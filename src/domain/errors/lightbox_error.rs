//! Lightbox initialization error types.

use thiserror::Error;

/// Failures that stop the lightbox from being wired into a page.
///
/// All of them are local: the host page keeps working without the viewer.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum LightboxError {
    #[error("overlay driver is not available: {reason}")]
    CollaboratorMissing { reason: String },

    #[error("no displayable attachments on this page")]
    EmptyResult,

    #[error("overlay rejected its configuration: {message}")]
    OverlayConfiguration { message: String },
}

impl LightboxError {
    /// Creates a missing collaborator error.
    #[must_use]
    pub fn collaborator_missing(reason: impl Into<String>) -> Self {
        Self::CollaboratorMissing {
            reason: reason.into(),
        }
    }

    /// Returns whether the page simply has nothing to show.
    ///
    /// Callers exit quietly on these instead of reporting a failure.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        matches!(self, Self::EmptyResult)
    }
}
