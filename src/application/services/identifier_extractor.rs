//! Attachment id extraction from URLs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{AttachmentId, PageScan};

static ATTACHMENT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/attachments/(?:(?:download|thumbnail)/)?(\d+)(?:[/?#]|$)")
        .expect("attachment url pattern is valid")
});

/// Recognizes attachment URLs.
pub struct IdentifierExtractor;

impl IdentifierExtractor {
    /// Extracts the attachment id from an attachment URL.
    ///
    /// Accepts `/attachments/<id>`, `/attachments/download/<id>` and
    /// `/attachments/thumbnail/<id>`, optionally followed by more path or a
    /// query string.
    #[must_use]
    pub fn extract(url: &str) -> Option<AttachmentId> {
        if !url.contains("/attachments/") {
            return None;
        }

        let caps = ATTACHMENT_URL_RE.captures(url)?;
        caps.get(1)?.as_str().parse::<AttachmentId>().ok()
    }

    /// Distinct attachment ids referenced by links and images of the main
    /// region, in order of first appearance.
    #[must_use]
    pub fn collect_candidates(scan: &PageScan) -> Vec<AttachmentId> {
        let mut seen = HashSet::new();
        scan.main_elements()
            .filter_map(|el| Self::extract(&el.url))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PageContext, PageElement};
    use test_case::test_case;

    #[test_case("/attachments/42" => Some(42); "bare id")]
    #[test_case("/attachments/download/42/photo.png" => Some(42); "download with filename")]
    #[test_case("https://redmine.example/attachments/thumbnail/42/200" => Some(42); "thumbnail with size")]
    #[test_case("/attachments/42?foo=bar" => Some(42); "query string")]
    #[test_case("/attachments/download/42" => Some(42); "download without filename")]
    #[test_case("/redmine/attachments/7/" => Some(7); "sub-uri prefix")]
    fn test_extracts_embedded_id(url: &str) -> Option<u64> {
        IdentifierExtractor::extract(url).map(AttachmentId::get)
    }

    #[test_case("/issues/42"; "unrelated path")]
    #[test_case("/attachments/abc"; "non numeric")]
    #[test_case("/attachments/42abc"; "trailing garbage")]
    #[test_case("/attachments/preview/42"; "unknown prefix")]
    #[test_case("/attachments/99999999999999999999999"; "overflowing id")]
    #[test_case(""; "empty")]
    fn test_rejects_non_attachment_urls(url: &str) {
        assert_eq!(IdentifierExtractor::extract(url), None);
    }

    #[test]
    fn test_candidates_are_deduplicated_in_discovery_order() {
        let scan = PageScan::new(
            PageContext::default(),
            vec![
                PageElement::image("/attachments/thumbnail/9/200"),
                PageElement::link("/attachments/3", "three.png"),
                PageElement::link("/attachments/download/9/nine.png", "nine.png"),
                PageElement::link("/issues/1", "Issue"),
                PageElement::link("/attachments/download/3/three.png", "three.png"),
            ],
        );

        let ids = IdentifierExtractor::collect_candidates(&scan);
        assert_eq!(ids, vec![AttachmentId::new(9), AttachmentId::new(3)]);
    }

    #[test]
    fn test_candidates_ignore_elements_outside_main() {
        let scan = PageScan::new(
            PageContext::default(),
            vec![
                PageElement::link("/attachments/download/1/a.png", "a.png").outside_main(),
                PageElement::link("/attachments/2", "b.png"),
            ],
        );

        let ids = IdentifierExtractor::collect_candidates(&scan);
        assert_eq!(ids, vec![AttachmentId::new(2)]);
    }
}
