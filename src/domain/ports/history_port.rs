//! Port for the browser address bar and session history.

use crate::domain::entities::AttachmentId;

/// Browser history operations.
pub trait HistoryPort {
    /// Current address-bar URL.
    fn location(&self) -> String;

    /// Adds a history entry for `url`.
    fn push_state(&mut self, url: &str, state: Option<AttachmentId>);

    /// Rewrites the current history entry to `url`.
    fn replace_state(&mut self, url: &str, state: Option<AttachmentId>);
}
