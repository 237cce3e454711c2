//! Thumbnail strip shown under the overlay.

use tracing::trace;

use crate::domain::entities::ContentDescriptor;
use crate::domain::ports::{PanelSurface, ThumbnailButton};

/// Default extra scroll applied when revealing a clipped thumbnail.
pub const DEFAULT_SCROLL_MARGIN: f64 = 4.0;

type ClickHandler = Box<dyn FnMut(usize)>;

/// One clickable thumbnail per slide, with a single active marker.
pub struct ThumbnailPanel<S: PanelSurface> {
    surface: S,
    buttons: Vec<ThumbnailButton>,
    active: Option<usize>,
    collapsed: bool,
    scroll_margin: f64,
    click_handlers: Vec<ClickHandler>,
}

impl<S: PanelSurface> ThumbnailPanel<S> {
    /// Renders a button for each descriptor onto `surface`.
    #[must_use]
    pub fn build(mut surface: S, descriptors: &[ContentDescriptor]) -> Self {
        let buttons: Vec<ThumbnailButton> = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| ThumbnailButton {
                index,
                label: button_label(descriptor.title(), index),
                thumb_url: descriptor.thumb_url().to_string(),
            })
            .collect();

        surface.render_buttons(&buttons);

        Self {
            surface,
            buttons,
            active: None,
            collapsed: false,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            click_handlers: Vec::new(),
        }
    }

    /// Overrides the reveal scroll margin.
    #[must_use]
    pub const fn with_scroll_margin(mut self, margin: f64) -> Self {
        self.scroll_margin = margin;
        self
    }

    /// Rendered buttons.
    #[must_use]
    pub fn buttons(&self) -> &[ThumbnailButton] {
        &self.buttons
    }

    /// Index of the highlighted button.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether the strip is collapsed.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Rendering surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Highlights exactly the button at `index`, or none when out of range,
    /// and scrolls it into view if clipped.
    pub fn set_active(&mut self, index: usize) {
        let target = (index < self.buttons.len()).then_some(index);
        for button in 0..self.buttons.len() {
            self.surface.set_button_active(button, Some(button) == target);
        }
        self.active = target;

        if let Some(index) = target {
            self.scroll_into_view(index);
        }
    }

    /// Registers a callback invoked with the index of a clicked thumbnail.
    pub fn on_thumbnail_click(&mut self, handler: impl FnMut(usize) + 'static) {
        self.click_handlers.push(Box::new(handler));
    }

    /// Delivers a click on the thumbnail at `index`.
    ///
    /// Returns false when there is no such thumbnail.
    pub fn click(&mut self, index: usize) -> bool {
        if index >= self.buttons.len() {
            return false;
        }
        for handler in &mut self.click_handlers {
            handler(index);
        }
        true
    }

    /// Flips the collapsed state. The active marker is untouched.
    pub fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.surface.set_collapsed(self.collapsed);
        self.collapsed
    }

    fn scroll_into_view(&mut self, index: usize) {
        let Some(button) = self.surface.button_span(index) else {
            return;
        };
        let viewport = self.surface.viewport_span();

        if button.right > viewport.right {
            let delta = button.right - viewport.right + self.scroll_margin;
            trace!(index, delta, "Revealing thumbnail clipped on the right");
            self.surface.scroll_by(delta);
        } else if button.left < viewport.left {
            let delta = viewport.left - button.left + self.scroll_margin;
            trace!(index, delta, "Revealing thumbnail clipped on the left");
            self.surface.scroll_by(-delta);
        }
    }
}

fn button_label(title: &str, index: usize) -> String {
    if title.is_empty() {
        format!("Image {}", index + 1)
    } else {
        title.to_string()
    }
}
