//! Application use cases.

mod build_gallery_use_case;
mod resolve_attachments_use_case;

pub use build_gallery_use_case::BuildGalleryUseCase;
pub use resolve_attachments_use_case::ResolveAttachmentsUseCase;
