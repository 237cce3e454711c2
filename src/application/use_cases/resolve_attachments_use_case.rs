//! Attachment resolution use case.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, trace, warn};

use crate::application::dto::{ResolutionSource, ResolvedAttachment};
use crate::application::services::{IdentifierExtractor, PageScanner};
use crate::domain::entities::{
    AttachmentId, AttachmentRecord, MediaKind, PageScan, last_path_segment,
};
use crate::domain::errors::ResolveError;
use crate::domain::ports::{AttachmentSourcePort, CACHE_KEY_PREFIX, SessionCachePort};

/// Resolves attachment ids found on a page into records.
///
/// Per id, first success wins:
/// 1. A download link rendered on the page
/// 2. Nothing else, when the page is known to render every download link
/// 3. The session cache
/// 4. The attachment detail page, whose result is cached
pub struct ResolveAttachmentsUseCase {
    source_port: Arc<dyn AttachmentSourcePort>,
    cache_port: Arc<dyn SessionCachePort>,
    detail_scanner: PageScanner,
    key_prefix: String,
}

impl ResolveAttachmentsUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        source_port: Arc<dyn AttachmentSourcePort>,
        cache_port: Arc<dyn SessionCachePort>,
    ) -> Self {
        Self {
            source_port,
            cache_port,
            detail_scanner: PageScanner::new(None),
            key_prefix: CACHE_KEY_PREFIX.to_string(),
        }
    }

    /// Resolves download links of fetched detail pages against `scanner`'s base URL.
    #[must_use]
    pub fn with_detail_scanner(mut self, scanner: PageScanner) -> Self {
        self.detail_scanner = scanner;
        self
    }

    /// Overrides the session cache key prefix.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Resolves every candidate concurrently.
    ///
    /// The output follows the order of `candidates`, whatever order the
    /// lookups complete in. Candidates that fail to resolve, or whose content
    /// is not a supported image, video or PDF, are left out.
    pub async fn execute(
        &self,
        candidates: &[AttachmentId],
        page: &PageScan,
    ) -> Vec<ResolvedAttachment> {
        let lookups = candidates.iter().map(|&id| self.resolve_one(id, page));
        let results = join_all(lookups).await;

        let resolved: Vec<ResolvedAttachment> = results
            .into_iter()
            .filter_map(|result| match result {
                Ok(resolved) => Some(resolved),
                Err(e) => {
                    warn!(error = %e, network = e.is_network_error(), "Dropping unresolved attachment");
                    None
                }
            })
            .filter(|resolved| {
                let supported = MediaKind::from_url(resolved.record.content_url()).is_some();
                if !supported {
                    debug!(
                        id = %resolved.record.id(),
                        url = resolved.record.content_url(),
                        "Skipping unsupported attachment type"
                    );
                }
                supported
            })
            .collect();

        debug!(
            candidates = candidates.len(),
            resolved = resolved.len(),
            "Resolved page attachments"
        );

        resolved
    }

    async fn resolve_one(
        &self,
        id: AttachmentId,
        page: &PageScan,
    ) -> Result<ResolvedAttachment, ResolveError> {
        if let Some(element) = page
            .download_elements()
            .find(|el| IdentifierExtractor::extract(&el.url) == Some(id))
        {
            trace!(id = %id, "Using download link rendered on page");
            let record = AttachmentRecord::new(id, element.display_filename(), element.url.clone());
            return Ok(ResolvedAttachment::new(record, ResolutionSource::DirectLink));
        }

        if page.context.exposes_download_links() {
            debug!(id = %id, "Page renders all download links; none found for attachment");
            return Err(ResolveError::NoDownloadLink { id });
        }

        let key = self.cache_key(id);
        if let Some(cached) = self.cache_port.get(&key).await {
            match serde_json::from_str::<AttachmentRecord>(&cached) {
                Ok(record) => {
                    trace!(id = %id, "Session cache hit");
                    return Ok(ResolvedAttachment::new(record, ResolutionSource::SessionCache));
                }
                Err(e) => {
                    warn!(error = %ResolveError::corrupt_cache(id, e.to_string()), "Ignoring cached attachment");
                }
            }
        }

        let record = self.fetch(id).await?;

        match serde_json::to_string(&record) {
            Ok(serialized) => {
                if let Err(e) = self.cache_port.set(&key, serialized).await {
                    warn!(id = %id, error = %e, "Failed to cache attachment data");
                }
            }
            Err(e) => warn!(id = %id, error = %e, "Failed to serialize attachment data"),
        }

        Ok(ResolvedAttachment::new(record, ResolutionSource::Network))
    }

    async fn fetch(&self, id: AttachmentId) -> Result<AttachmentRecord, ResolveError> {
        debug!(id = %id, "Fetching attachment detail page");
        let html = self.source_port.fetch_detail_page(id).await?;

        let link = self
            .detail_scanner
            .find_download_link(&html)
            .ok_or(ResolveError::NoDownloadLink { id })?;

        let filename = last_path_segment(&link.url).to_string();
        Ok(AttachmentRecord::new(id, filename, link.url))
    }

    fn cache_key(&self, id: AttachmentId) -> String {
        format!("{}{id}", self.key_prefix)
    }
}
