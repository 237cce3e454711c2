//! Renderable content descriptors for the lightbox overlay.

use serde::Serialize;

use super::AttachmentId;

/// Image file extensions shown as plain images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];

/// Video file extensions played with the native video element.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "flv", "mkv"];

/// Document extension embedded in a frame.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Display size used for inline (video and document) slides.
pub const INLINE_WIDTH: &str = "90vw";
/// Display height used for inline (video and document) slides.
pub const INLINE_HEIGHT: &str = "90vh";

/// Media family of an attachment, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video playable by the browser.
    Video,
    /// PDF document.
    Document,
}

impl MediaKind {
    /// Classifies a URL by the extension of its path.
    ///
    /// Matching is case-insensitive and ignores the query string and fragment.
    /// Returns `None` for unsupported extensions.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let ext = url_extension(url)?;
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if ext == DOCUMENT_EXTENSION {
            Some(Self::Document)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Returns the lowercase extension of the last path segment of `url`.
#[must_use]
pub fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Maps a video extension to its MIME type, falling back to `video/mp4`.
#[must_use]
pub fn video_mime_type(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        _ => "video/mp4",
    }
}

/// One slide of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDescriptor {
    /// Plain image slide.
    Image {
        /// Attachment shown by this slide.
        id: AttachmentId,
        /// Full-size image URL.
        href: String,
        /// Caption; empty when the filename is unknown.
        title: String,
        /// Thumbnail URL.
        thumb_url: String,
    },
    /// Native video slide.
    Video {
        /// Attachment shown by this slide.
        id: AttachmentId,
        /// Video element markup.
        inline_markup: String,
        /// MIME type of the video source.
        mime_type: &'static str,
        /// Caption.
        title: String,
        /// Thumbnail URL or placeholder data URI.
        thumb_url: String,
        /// CSS width.
        width: &'static str,
        /// CSS height.
        height: &'static str,
    },
    /// Embedded document slide.
    Document {
        /// Attachment shown by this slide.
        id: AttachmentId,
        /// Frame markup.
        inline_markup: String,
        /// Caption.
        title: String,
        /// Thumbnail URL or placeholder data URI.
        thumb_url: String,
        /// CSS width.
        width: &'static str,
        /// CSS height.
        height: &'static str,
    },
}

impl ContentDescriptor {
    /// Attachment id this slide belongs to.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        match self {
            Self::Image { id, .. } | Self::Video { id, .. } | Self::Document { id, .. } => *id,
        }
    }

    /// Media family of the slide.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Image { .. } => MediaKind::Image,
            Self::Video { .. } => MediaKind::Video,
            Self::Document { .. } => MediaKind::Document,
        }
    }

    /// Caption shown under the slide and on its thumbnail.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Image { title, .. } | Self::Video { title, .. } | Self::Document { title, .. } => {
                title
            }
        }
    }

    /// Thumbnail URL.
    #[must_use]
    pub fn thumb_url(&self) -> &str {
        match self {
            Self::Image { thumb_url, .. }
            | Self::Video { thumb_url, .. }
            | Self::Document { thumb_url, .. } => thumb_url,
        }
    }

    /// Converts the descriptor to the overlay's element configuration.
    #[must_use]
    pub fn to_overlay_element(&self) -> OverlayElement {
        match self {
            Self::Image {
                href,
                title,
                thumb_url,
                ..
            } => OverlayElement {
                kind: OverlayElementKind::Image,
                href: Some(href.clone()),
                content: None,
                title: title.clone(),
                alt: Some(title.clone()),
                thumb: thumb_url.clone(),
                width: None,
                height: None,
            },
            Self::Video {
                inline_markup,
                title,
                thumb_url,
                width,
                height,
                ..
            }
            | Self::Document {
                inline_markup,
                title,
                thumb_url,
                width,
                height,
                ..
            } => OverlayElement {
                kind: OverlayElementKind::Inline,
                href: None,
                content: Some(inline_markup.clone()),
                title: title.clone(),
                alt: None,
                thumb: thumb_url.clone(),
                width: Some(width),
                height: Some(height),
            },
        }
    }
}

/// Element type understood by the overlay widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayElementKind {
    /// Image loaded from `href`.
    Image,
    /// HTML rendered from `content`.
    Inline,
}

/// Overlay widget element, serialized in the widget's configuration format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayElement {
    /// Element type.
    #[serde(rename = "type")]
    pub kind: OverlayElementKind,
    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Inline HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Caption.
    pub title: String,
    /// Alternative text for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Thumbnail URL.
    pub thumb: String,
    /// CSS width of inline content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<&'static str>,
    /// CSS height of inline content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<&'static str>,
}
