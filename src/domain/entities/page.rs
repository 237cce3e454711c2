//! Snapshot of the host page's links and images.

/// Tag of a scanned page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<a href>` element.
    Link,
    /// `<img src>` element.
    Image,
}

/// A link or image found on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    /// Element tag.
    pub kind: ElementKind,
    /// Resolved `href` (links) or `src` (images).
    pub url: String,
    /// Text content of a link; empty for images.
    pub text: String,
    /// `alt` attribute.
    pub alt: Option<String>,
    /// `title` attribute.
    pub title: Option<String>,
    /// `data-method` attribute of links (`delete` for destroy links).
    pub data_method: Option<String>,
    /// Whether an image is wrapped in a link.
    pub inside_link: bool,
    /// Whether the element lies in the main content region.
    pub in_main: bool,
}

impl PageElement {
    /// Creates a link element in the main region.
    #[must_use]
    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Link,
            url: url.into(),
            text: text.into(),
            alt: None,
            title: None,
            data_method: None,
            inside_link: false,
            in_main: true,
        }
    }

    /// Creates an image element in the main region.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image,
            url: src.into(),
            text: String::new(),
            alt: None,
            title: None,
            data_method: None,
            inside_link: false,
            in_main: true,
        }
    }

    /// Sets the `alt` attribute.
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Sets the `title` attribute.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Marks the element as lying outside the main region.
    #[must_use]
    pub const fn outside_main(mut self) -> Self {
        self.in_main = false;
        self
    }

    /// Marks an image as wrapped in a link.
    #[must_use]
    pub const fn wrapped_in_link(mut self) -> Self {
        self.inside_link = true;
        self
    }

    /// Sets the `data-method` attribute.
    #[must_use]
    pub fn with_data_method(mut self, method: impl Into<String>) -> Self {
        self.data_method = Some(method.into());
        self
    }

    /// Whether the element points at a raw download path.
    #[must_use]
    pub fn is_download_link(&self) -> bool {
        self.url.contains("/attachments/download/")
    }

    /// Whether the element points at a generated thumbnail.
    #[must_use]
    pub fn is_thumbnail(&self) -> bool {
        self.url.contains("/attachments/thumbnail/")
    }

    /// Best display filename: text, then alt, then title, then the last URL segment.
    #[must_use]
    pub fn display_filename(&self) -> String {
        let non_empty = |value: &str| (!value.trim().is_empty()).then(|| value.trim().to_string());

        non_empty(&self.text)
            .or_else(|| self.alt.as_deref().and_then(non_empty))
            .or_else(|| self.title.as_deref().and_then(non_empty))
            .unwrap_or_else(|| last_path_segment(&self.url).to_string())
    }
}

/// Last `/`-separated segment of a URL, without its query string.
#[must_use]
pub fn last_path_segment(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or("")
}

/// Controller and action of the rendered page, read from the body classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Controller name, e.g. `issues`.
    pub controller: Option<String>,
    /// Action name, e.g. `show`.
    pub action: Option<String>,
}

impl PageContext {
    /// Creates a context.
    #[must_use]
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: Some(controller.into()),
            action: Some(action.into()),
        }
    }

    /// Whether the page renders every attachment's download link itself.
    ///
    /// The issue page lists all attachments with download links, so ids found
    /// there never need a network lookup.
    #[must_use]
    pub fn exposes_download_links(&self) -> bool {
        self.controller.as_deref() == Some("issues") && self.action.as_deref() == Some("show")
    }
}

/// All links and images of a page in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    /// Page context.
    pub context: PageContext,
    /// Elements in document order.
    pub elements: Vec<PageElement>,
}

impl PageScan {
    /// Creates a scan from its parts.
    #[must_use]
    pub const fn new(context: PageContext, elements: Vec<PageElement>) -> Self {
        Self { context, elements }
    }

    /// Elements inside the main content region.
    pub fn main_elements(&self) -> impl Iterator<Item = &PageElement> {
        self.elements.iter().filter(|el| el.in_main)
    }

    /// Elements pointing at raw download paths, anywhere on the page.
    pub fn download_elements(&self) -> impl Iterator<Item = &PageElement> {
        self.elements.iter().filter(|el| el.is_download_link())
    }
}
