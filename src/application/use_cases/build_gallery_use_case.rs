//! Gallery construction use case.

use tracing::{debug, info, trace};

use super::ResolveAttachmentsUseCase;
use crate::application::dto::Gallery;
use crate::application::services::{ContentClassifier, IdentifierExtractor};
use crate::domain::entities::{AttachmentRecord, PageScan};
use crate::domain::errors::LightboxError;

/// Turns a scanned page into the ordered slides of the viewer.
pub struct BuildGalleryUseCase {
    resolver: ResolveAttachmentsUseCase,
}

impl BuildGalleryUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(resolver: ResolveAttachmentsUseCase) -> Self {
        Self { resolver }
    }

    /// Discovers, resolves and classifies the attachments of `page`.
    ///
    /// # Errors
    /// Returns [`LightboxError::EmptyResult`] when nothing on the page can be shown.
    pub async fn execute(&self, page: &PageScan) -> Result<Gallery, LightboxError> {
        let candidates = IdentifierExtractor::collect_candidates(page);
        debug!(count = candidates.len(), "Found attachment candidates");

        if candidates.is_empty() {
            return Err(LightboxError::EmptyResult);
        }

        let records: Vec<AttachmentRecord> = self
            .resolver
            .execute(&candidates, page)
            .await
            .into_iter()
            .inspect(|resolved| {
                trace!(id = %resolved.record.id(), source = %resolved.source, "Resolved attachment");
            })
            .map(|resolved| resolved.record)
            .collect();

        if records.is_empty() {
            return Err(LightboxError::EmptyResult);
        }

        let gallery = Gallery::new(ContentClassifier::new(page).classify_all(&records));
        info!(slides = gallery.len(), "Built attachment gallery");

        Ok(gallery)
    }
}
