//! Gallery DTOs.

use serde::Serialize;

use crate::domain::entities::{AttachmentId, AttachmentRecord, ContentDescriptor, OverlayElement};

/// Where a resolved attachment record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A download link rendered on the page.
    DirectLink,
    /// The session cache.
    SessionCache,
    /// The attachment detail page.
    Network,
}

impl ResolutionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::DirectLink => "page download link",
            Self::SessionCache => "session cache",
            Self::Network => "attachment page",
        }
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Attachment record with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttachment {
    /// The record.
    pub record: AttachmentRecord,
    /// Source of the record.
    pub source: ResolutionSource,
}

impl ResolvedAttachment {
    /// Creates new resolved attachment.
    #[must_use]
    pub const fn new(record: AttachmentRecord, source: ResolutionSource) -> Self {
        Self { record, source }
    }
}

/// Ordered slides of a page.
///
/// Slide `i` always shows attachment `ids()[i]`; the order is fixed for the
/// lifetime of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    ids: Vec<AttachmentId>,
    descriptors: Vec<ContentDescriptor>,
}

impl Gallery {
    /// Creates a gallery from slides in display order.
    #[must_use]
    pub fn new(descriptors: Vec<ContentDescriptor>) -> Self {
        let ids = descriptors.iter().map(ContentDescriptor::id).collect();
        Self { ids, descriptors }
    }

    /// Attachment ids, parallel to [`Self::descriptors`].
    #[must_use]
    pub fn ids(&self) -> &[AttachmentId] {
        &self.ids
    }

    /// Slides in display order.
    #[must_use]
    pub fn descriptors(&self) -> &[ContentDescriptor] {
        &self.descriptors
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Slide index showing `id`.
    #[must_use]
    pub fn index_of(&self, id: AttachmentId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Attachment shown by slide `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<AttachmentId> {
        self.ids.get(index).copied()
    }

    /// Slide at `index`.
    #[must_use]
    pub fn descriptor(&self, index: usize) -> Option<&ContentDescriptor> {
        self.descriptors.get(index)
    }

    /// Overlay configuration elements, one per slide.
    #[must_use]
    pub fn overlay_elements(&self) -> Vec<OverlayElement> {
        self.descriptors
            .iter()
            .map(ContentDescriptor::to_overlay_element)
            .collect()
    }
}
