//! Port for the rendered thumbnail strip.

/// Horizontal extent of a box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// One thumbnail button to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailButton {
    /// Slide index.
    pub index: usize,
    /// Title and aria-label.
    pub label: String,
    /// Thumbnail image URL; no image is rendered when empty.
    pub thumb_url: String,
}

/// Rendering surface of the thumbnail panel.
pub trait PanelSurface {
    /// Replaces the rendered buttons.
    fn render_buttons(&mut self, buttons: &[ThumbnailButton]);

    /// Sets or clears the active marker of one button.
    fn set_button_active(&mut self, index: usize, active: bool);

    /// Current extent of a button, if rendered.
    fn button_span(&self, index: usize) -> Option<Span>;

    /// Current extent of the scroll container.
    fn viewport_span(&self) -> Span;

    /// Scrolls the container horizontally by `delta`.
    fn scroll_by(&mut self, delta: f64);

    /// Applies or removes the collapsed state class.
    fn set_collapsed(&mut self, collapsed: bool);
}
