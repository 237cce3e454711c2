//! Port for fetching attachment detail pages.

use async_trait::async_trait;

use crate::domain::entities::AttachmentId;
use crate::domain::errors::ResolveError;

/// Source of attachment detail pages (`GET /attachments/{id}`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentSourcePort: Send + Sync {
    /// Fetches the HTML of the attachment's detail page.
    async fn fetch_detail_page(&self, id: AttachmentId) -> Result<String, ResolveError>;
}
