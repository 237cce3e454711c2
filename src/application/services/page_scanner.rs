//! Extracts links and images from rendered issue-tracker pages.

use std::cell::RefCell;

use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use tracing::{trace, warn};
use url::Url;

use crate::domain::entities::{PageContext, PageElement, PageScan};

const DOWNLOAD_LINK_SELECTOR: &str = r#"a[href*="/attachments/download/"]"#;

/// Scans HTML for the elements the lightbox cares about.
pub struct PageScanner {
    base: Option<Url>,
}

#[derive(Default)]
struct ScanState {
    context: PageContext,
    elements: Vec<PageElement>,
    open_link: Option<usize>,
}

impl ScanState {
    fn push(&mut self, element: PageElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    fn mark_last(&mut self, mark: impl FnOnce(&mut PageElement)) {
        if let Some(element) = self.elements.last_mut() {
            mark(element);
        }
    }
}

impl PageScanner {
    /// Creates a scanner resolving relative URLs against `base`.
    #[must_use]
    pub const fn new(base: Option<Url>) -> Self {
        Self { base }
    }

    /// Scans a full page.
    ///
    /// Elements come back in document order. Only those under `#main` are
    /// flagged as main content.
    #[must_use]
    pub fn scan(&self, html: &str) -> PageScan {
        let state = RefCell::new(ScanState::default());

        // Handlers for one start tag run in registration order, so the marker
        // selectors below always see the element pushed for that tag.
        let result = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!("body[class]", |el| {
                        if let Some(classes) = el.get_attribute("class") {
                            state.borrow_mut().context = context_from_classes(&classes);
                        }
                        Ok(())
                    }),
                    element!("a[href]", |el| {
                        let Some(href) = el.get_attribute("href") else {
                            return Ok(());
                        };
                        let mut link = PageElement::link(self.resolve(&href), "").outside_main();
                        link.title = el.get_attribute("title").map(|v| decode(&v));
                        link.data_method = el.get_attribute("data-method");

                        let mut state = state.borrow_mut();
                        let index = state.push(link);
                        state.open_link = Some(index);
                        Ok(())
                    }),
                    element!("img[src]", |el| {
                        let Some(src) = el.get_attribute("src") else {
                            return Ok(());
                        };
                        let mut image = PageElement::image(self.resolve(&src)).outside_main();
                        image.alt = el.get_attribute("alt").map(|v| decode(&v));
                        image.title = el.get_attribute("title").map(|v| decode(&v));
                        state.borrow_mut().push(image);
                        Ok(())
                    }),
                    element!("#main a[href]", |_| {
                        state.borrow_mut().mark_last(|el| el.in_main = true);
                        Ok(())
                    }),
                    element!("#main img[src]", |_| {
                        state.borrow_mut().mark_last(|el| el.in_main = true);
                        Ok(())
                    }),
                    element!("a img[src]", |_| {
                        state.borrow_mut().mark_last(|el| el.inside_link = true);
                        Ok(())
                    }),
                    text!("a[href]", |chunk| {
                        let mut state = state.borrow_mut();
                        if let Some(index) = state.open_link {
                            state.elements[index].text.push_str(chunk.as_str());
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        );

        if let Err(e) = result {
            warn!(error = %e, "Page scan stopped early");
        }

        let ScanState {
            context,
            mut elements,
            ..
        } = state.into_inner();
        for element in &mut elements {
            element.text = decode(&element.text).trim().to_string();
        }
        trace!(count = elements.len(), "Scanned page elements");

        PageScan::new(context, elements)
    }

    /// First link on the page pointing at a raw download path.
    #[must_use]
    pub fn find_download_link(&self, html: &str) -> Option<PageElement> {
        let found = RefCell::new(None);

        let result = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(DOWNLOAD_LINK_SELECTOR, |el| {
                    let mut found = found.borrow_mut();
                    if found.is_none() {
                        *found = el
                            .get_attribute("href")
                            .map(|href| PageElement::link(self.resolve(&href), ""));
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        );

        if let Err(e) = result {
            warn!(error = %e, "Detail page scan stopped early");
        }

        found.into_inner()
    }

    fn resolve(&self, raw: &str) -> String {
        let decoded = decode(raw.trim());
        match &self.base {
            Some(base) => base
                .join(&decoded)
                .map_or(decoded, |resolved| resolved.to_string()),
            None => decoded,
        }
    }
}

fn context_from_classes(classes: &str) -> PageContext {
    let class_value = |prefix: &str| {
        classes
            .split_whitespace()
            .find_map(|class| class.strip_prefix(prefix))
            .map(str::to_string)
    };

    PageContext {
        controller: class_value("controller-"),
        action: class_value("action-"),
    }
}

fn decode(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}
