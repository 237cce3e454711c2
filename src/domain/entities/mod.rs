//! Domain entity definitions.

mod attachment;
mod content;
mod page;

pub use attachment::{AttachmentId, AttachmentRecord};
pub use content::{
    ContentDescriptor, DOCUMENT_EXTENSION, IMAGE_EXTENSIONS, INLINE_HEIGHT, INLINE_WIDTH,
    MediaKind, OverlayElement, OverlayElementKind, VIDEO_EXTENSIONS, url_extension,
    video_mime_type,
};
pub use page::{ElementKind, PageContext, PageElement, PageScan, last_path_segment};
