//! Builds viewer slides from resolved attachments.

use super::identifier_extractor::IdentifierExtractor;
use crate::domain::entities::{
    AttachmentId, AttachmentRecord, ContentDescriptor, ElementKind, INLINE_HEIGHT, INLINE_WIDTH,
    MediaKind, PageScan, url_extension, video_mime_type,
};

/// Placeholder thumbnail for videos: play icon on a dark square.
pub const VIDEO_PLACEHOLDER_THUMB: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Crect fill='%23333' width='100' height='100'/%3E%3Cpolygon fill='%23fff' points='41.25,31.25 41.25,68.75 68.75,50'/%3E%3C/svg%3E";

/// Placeholder thumbnail for PDF documents.
pub const DOCUMENT_PLACEHOLDER_THUMB: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Crect fill='%23e2e2e2' width='100' height='100'/%3E%3Ctext x='50' y='55' font-size='30' text-anchor='middle' fill='%23333' font-family='Arial, sans-serif'%3EPDF%3C/text%3E%3C/svg%3E";

/// Maps resolved attachments to content descriptors.
///
/// Thumbnails already rendered on the page are reused when present.
pub struct ContentClassifier<'a> {
    page: &'a PageScan,
}

impl<'a> ContentClassifier<'a> {
    /// Creates a classifier looking up thumbnails in `page`.
    #[must_use]
    pub const fn new(page: &'a PageScan) -> Self {
        Self { page }
    }

    /// Classifies one record by the extension of its content URL.
    #[must_use]
    pub fn classify(&self, record: &AttachmentRecord) -> ContentDescriptor {
        let id = record.id();
        let url = record.content_url();
        let title = record.filename().to_string();
        let page_thumb = self.page_thumbnail(id);

        match MediaKind::from_url(url) {
            Some(MediaKind::Video) => {
                let ext = url_extension(url).unwrap_or_default();
                let mime_type = video_mime_type(&ext);
                ContentDescriptor::Video {
                    id,
                    inline_markup: video_markup(url, mime_type),
                    mime_type,
                    title,
                    thumb_url: page_thumb.unwrap_or_else(|| VIDEO_PLACEHOLDER_THUMB.to_string()),
                    width: INLINE_WIDTH,
                    height: INLINE_HEIGHT,
                }
            }
            Some(MediaKind::Document) => ContentDescriptor::Document {
                id,
                inline_markup: document_markup(url),
                title,
                thumb_url: page_thumb.unwrap_or_else(|| DOCUMENT_PLACEHOLDER_THUMB.to_string()),
                width: INLINE_WIDTH,
                height: INLINE_HEIGHT,
            },
            Some(MediaKind::Image) | None => ContentDescriptor::Image {
                id,
                href: url.to_string(),
                title,
                thumb_url: page_thumb.unwrap_or_else(|| url.to_string()),
            },
        }
    }

    /// Classifies every record, keeping their order.
    #[must_use]
    pub fn classify_all(&self, records: &[AttachmentRecord]) -> Vec<ContentDescriptor> {
        records.iter().map(|record| self.classify(record)).collect()
    }

    fn page_thumbnail(&self, id: AttachmentId) -> Option<String> {
        self.page
            .elements
            .iter()
            .find(|el| {
                el.kind == ElementKind::Image
                    && el.is_thumbnail()
                    && IdentifierExtractor::extract(&el.url) == Some(id)
            })
            .map(|el| el.url.clone())
    }
}

fn video_markup(url: &str, mime_type: &str) -> String {
    format!(
        r#"<video class="glightbox-video-native" controls preload="metadata"><source src="{}" type="{mime_type}"></video>"#,
        html_escape::encode_double_quoted_attribute(url)
    )
}

fn document_markup(url: &str) -> String {
    format!(
        r#"<iframe class="glightbox-pdf-iframe" src="{}" style="width: 100%; height: 100%;" loading="lazy"></iframe>"#,
        html_escape::encode_double_quoted_attribute(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PageContext, PageElement};

    fn record(id: u64, filename: &str, url: &str) -> AttachmentRecord {
        AttachmentRecord::new(AttachmentId::new(id), filename, url)
    }

    #[test]
    fn test_image_uses_content_url_as_thumbnail_fallback() {
        let page = PageScan::default();
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(42, "photo.png", "/attachments/download/42/photo.png"));

        assert_eq!(
            descriptor,
            ContentDescriptor::Image {
                id: AttachmentId::new(42),
                href: "/attachments/download/42/photo.png".into(),
                title: "photo.png".into(),
                thumb_url: "/attachments/download/42/photo.png".into(),
            }
        );
    }

    #[test]
    fn test_image_prefers_page_thumbnail() {
        let page = PageScan::new(
            PageContext::default(),
            vec![PageElement::image("/attachments/thumbnail/42/200")],
        );
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(42, "photo.png", "/attachments/download/42/photo.png"));
        assert_eq!(descriptor.thumb_url(), "/attachments/thumbnail/42/200");
    }

    #[test]
    fn test_video_descriptor() {
        let page = PageScan::default();
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(7, "clip.mp4", "/attachments/download/7/clip.mp4"));

        let ContentDescriptor::Video {
            inline_markup,
            mime_type,
            title,
            thumb_url,
            width,
            height,
            ..
        } = descriptor
        else {
            panic!("expected video descriptor");
        };
        assert_eq!(mime_type, "video/mp4");
        assert_eq!(title, "clip.mp4");
        assert_eq!(thumb_url, VIDEO_PLACEHOLDER_THUMB);
        assert_eq!((width, height), ("90vw", "90vh"));
        assert!(inline_markup.contains(r#"<source src="/attachments/download/7/clip.mp4" type="video/mp4">"#));
    }

    #[test]
    fn test_video_mime_ignores_case_and_query() {
        let page = PageScan::default();
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(8, "movie.MOV", "/attachments/download/8/movie.MOV?ts=1"));
        assert!(matches!(
            descriptor,
            ContentDescriptor::Video { mime_type: "video/quicktime", .. }
        ));
    }

    #[test]
    fn test_pdf_descriptor_embeds_lazy_frame() {
        let page = PageScan::default();
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(5, "", "/attachments/download/5/manual.pdf"));

        assert_eq!(descriptor.kind(), MediaKind::Document);
        assert_eq!(descriptor.title(), "");
        assert_eq!(descriptor.thumb_url(), DOCUMENT_PLACEHOLDER_THUMB);
        let ContentDescriptor::Document { inline_markup, .. } = descriptor else {
            panic!("expected document descriptor");
        };
        assert!(inline_markup.contains(r#"loading="lazy""#));
        assert!(inline_markup.contains("/attachments/download/5/manual.pdf"));
    }

    #[test]
    fn test_markup_escapes_quotes_in_url() {
        let page = PageScan::default();
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(6, "a.pdf", r#"/attachments/download/6/a.pdf?x="1"&y=2"#));
        let ContentDescriptor::Document { inline_markup, .. } = descriptor else {
            panic!("expected document descriptor");
        };
        assert!(inline_markup.contains(r#"src="/attachments/download/6/a.pdf?x=&quot;1&quot;&amp;y=2""#));
    }

    #[test]
    fn test_thumbnail_lookup_does_not_match_longer_ids() {
        let page = PageScan::new(
            PageContext::default(),
            vec![PageElement::image("/attachments/thumbnail/420/200")],
        );
        let descriptor = ContentClassifier::new(&page)
            .classify(&record(42, "a.png", "/attachments/download/42/a.png"));
        assert_eq!(descriptor.thumb_url(), "/attachments/download/42/a.png");
    }
}
