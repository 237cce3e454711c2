//! Thumbnail strip laid out with fixed-width buttons.

use crate::domain::ports::{PanelSurface, Span, ThumbnailButton};

/// Horizontal strip of equally sized buttons inside a scroll container.
#[derive(Debug, Clone)]
pub struct StripSurface {
    viewport_width: f64,
    button_width: f64,
    gap: f64,
    scroll_left: f64,
    buttons: Vec<ThumbnailButton>,
    active: Vec<bool>,
    collapsed: bool,
}

impl StripSurface {
    /// Creates a strip with a container `viewport_width` wide.
    #[must_use]
    pub const fn new(viewport_width: f64, button_width: f64, gap: f64) -> Self {
        Self {
            viewport_width,
            button_width,
            gap,
            scroll_left: 0.0,
            buttons: Vec::new(),
            active: Vec::new(),
            collapsed: false,
        }
    }

    /// Rendered buttons.
    #[must_use]
    pub fn buttons(&self) -> &[ThumbnailButton] {
        &self.buttons
    }

    /// Indices of buttons carrying the active marker.
    #[must_use]
    pub fn active_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(index, active)| active.then_some(index))
            .collect()
    }

    /// Current horizontal scroll offset.
    #[must_use]
    pub const fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Whether the collapsed class is applied.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[allow(clippy::cast_precision_loss)]
    fn content_width(&self) -> f64 {
        let count = self.buttons.len() as f64;
        if count == 0.0 {
            return 0.0;
        }
        count * self.button_width + (count - 1.0) * self.gap
    }
}

impl Default for StripSurface {
    fn default() -> Self {
        Self::new(800.0, 96.0, 8.0)
    }
}

impl PanelSurface for StripSurface {
    fn render_buttons(&mut self, buttons: &[ThumbnailButton]) {
        self.buttons = buttons.to_vec();
        self.active = vec![false; buttons.len()];
        self.scroll_left = 0.0;
    }

    fn set_button_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(index) {
            *flag = active;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn button_span(&self, index: usize) -> Option<Span> {
        if index >= self.buttons.len() {
            return None;
        }
        let left = index as f64 * (self.button_width + self.gap) - self.scroll_left;
        Some(Span::new(left, left + self.button_width))
    }

    fn viewport_span(&self) -> Span {
        Span::new(0.0, self.viewport_width)
    }

    fn scroll_by(&mut self, delta: f64) {
        let max = (self.content_width() - self.viewport_width).max(0.0);
        self.scroll_left = (self.scroll_left + delta).clamp(0.0, max);
    }

    fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}
