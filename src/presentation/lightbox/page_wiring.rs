//! Click interception for page elements that show a gallery attachment.

use crate::application::dto::Gallery;
use crate::application::services::IdentifierExtractor;
use crate::domain::entities::{ElementKind, PageElement, PageScan};

/// A page element whose clicks open the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    /// Position of the element in the page scan.
    pub element: usize,
    /// Slide the element opens.
    pub slide: usize,
    /// Whether the element gets a pointer cursor.
    pub pointer_cursor: bool,
}

/// What happens to a click on a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default navigation is suppressed and the overlay opens at `slide`.
    Intercepted {
        /// Slide to open.
        slide: usize,
    },
    /// The browser handles the click.
    PassThrough,
}

/// Click handlers installed on the host page.
#[derive(Debug, Clone, Default)]
pub struct PageWiring {
    targets: Vec<ClickTarget>,
}

impl PageWiring {
    /// Finds every element of `page` that shows a slide of `gallery`.
    ///
    /// Raw download anchors stay native because they are the filename source
    /// for resolution; destroy anchors are never touched.
    #[must_use]
    pub fn wire(page: &PageScan, gallery: &Gallery) -> Self {
        let targets = page
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| is_interceptable(element))
            .filter_map(|(position, element)| {
                let id = IdentifierExtractor::extract(&element.url)?;
                let slide = gallery.index_of(id)?;
                Some(ClickTarget {
                    element: position,
                    slide,
                    pointer_cursor: element.kind == ElementKind::Image && !element.inside_link,
                })
            })
            .collect();

        Self { targets }
    }

    /// Wired elements in page order.
    #[must_use]
    pub fn targets(&self) -> &[ClickTarget] {
        &self.targets
    }

    /// Outcome of clicking the element at `element` in the page scan.
    #[must_use]
    pub fn click(&self, element: usize) -> ClickOutcome {
        self.targets
            .iter()
            .find(|target| target.element == element)
            .map_or(ClickOutcome::PassThrough, |target| ClickOutcome::Intercepted {
                slide: target.slide,
            })
    }
}

fn is_interceptable(element: &PageElement) -> bool {
    match element.kind {
        ElementKind::Link => {
            !element.is_download_link()
                && !element
                    .data_method
                    .as_deref()
                    .is_some_and(|method| method.eq_ignore_ascii_case("delete"))
        }
        ElementKind::Image => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AttachmentId, ContentDescriptor, PageContext};

    fn image(id: u64) -> ContentDescriptor {
        ContentDescriptor::Image {
            id: AttachmentId::new(id),
            href: format!("/attachments/download/{id}/f{id}.png"),
            title: format!("f{id}.png"),
            thumb_url: String::new(),
        }
    }

    fn page() -> PageScan {
        PageScan::new(
            PageContext::default(),
            vec![
                PageElement::link("/attachments/download/42/photo.png", "photo.png"),
                PageElement::link("/attachments/42", "details"),
                PageElement::link("/attachments/42", "x").with_data_method("delete"),
                PageElement::image("/attachments/thumbnail/42/200").wrapped_in_link(),
                PageElement::image("/attachments/download/7/inline.png"),
                PageElement::link("/attachments/99", "unknown"),
                PageElement::link("/issues/7", "Issue #7"),
            ],
        )
    }

    #[test]
    fn test_wires_only_recognized_non_download_elements() {
        let gallery = Gallery::new(vec![image(7), image(42)]);
        let wiring = PageWiring::wire(&page(), &gallery);

        let elements: Vec<usize> = wiring.targets().iter().map(|t| t.element).collect();
        assert_eq!(elements, vec![1, 3, 4]);
    }

    #[test]
    fn test_click_maps_to_slide_index() {
        let gallery = Gallery::new(vec![image(7), image(42)]);
        let wiring = PageWiring::wire(&page(), &gallery);

        assert_eq!(wiring.click(1), ClickOutcome::Intercepted { slide: 1 });
        assert_eq!(wiring.click(4), ClickOutcome::Intercepted { slide: 0 });
        assert_eq!(wiring.click(0), ClickOutcome::PassThrough);
        assert_eq!(wiring.click(2), ClickOutcome::PassThrough);
        assert_eq!(wiring.click(5), ClickOutcome::PassThrough);
    }

    #[test]
    fn test_pointer_cursor_only_for_bare_images() {
        let gallery = Gallery::new(vec![image(7), image(42)]);
        let wiring = PageWiring::wire(&page(), &gallery);

        let pointers: Vec<usize> = wiring
            .targets()
            .iter()
            .filter(|t| t.pointer_cursor)
            .map(|t| t.element)
            .collect();
        assert_eq!(pointers, vec![4]);
    }

    #[test]
    fn test_empty_gallery_wires_nothing() {
        let wiring = PageWiring::wire(&page(), &Gallery::default());
        assert!(wiring.targets().is_empty());
    }
}
