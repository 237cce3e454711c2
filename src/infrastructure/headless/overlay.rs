//! Overlay driver that keeps viewer state in memory.
//!
//! Fires lifecycle events in the same order as the browser widget: `Opened`
//! then the first `SlideLoaded` on open, `BeforeSlideChange` before moving,
//! `SlideLoaded` the first time a slide is shown and `Closed` on close.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::slide::HeadlessSlide;
use crate::domain::entities::OverlayElement;
use crate::domain::errors::LightboxError;
use crate::domain::ports::{
    OverlayDriver, OverlayEvent, OverlayOptions, OverlayProvider, SlideNode, SlidePayload,
    ToggleInstall,
};

/// Creates [`HeadlessOverlay`] instances.
#[derive(Debug, Clone)]
pub struct HeadlessOverlayProvider {
    available: bool,
    close_control: bool,
}

impl HeadlessOverlayProvider {
    /// Provider whose overlays have a close control.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            available: true,
            close_control: true,
        }
    }

    /// Provider reporting the widget as not loaded.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            available: false,
            close_control: true,
        }
    }

    /// Provider whose overlays render without a close control.
    #[must_use]
    pub const fn without_close_control(mut self) -> Self {
        self.close_control = false;
        self
    }
}

impl Default for HeadlessOverlayProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayProvider for HeadlessOverlayProvider {
    type Driver = HeadlessOverlay;

    fn is_available(&self) -> bool {
        self.available
    }

    fn create(
        &self,
        options: &OverlayOptions,
        elements: Vec<OverlayElement>,
        events: mpsc::UnboundedSender<OverlayEvent>,
    ) -> Result<HeadlessOverlay, LightboxError> {
        if !self.available {
            return Err(LightboxError::collaborator_missing("headless overlay disabled"));
        }
        if elements.is_empty() {
            return Err(LightboxError::OverlayConfiguration {
                message: "no slides configured".to_string(),
            });
        }
        debug!(slides = elements.len(), effect = ?options.slide_effect, "Created headless overlay");

        let slides = elements
            .iter()
            .map(|element| Arc::new(HeadlessSlide::for_element(element)))
            .collect();

        Ok(HeadlessOverlay {
            options: options.clone(),
            elements,
            slides,
            events,
            open: false,
            active: 0,
            loaded: HashSet::new(),
            close_control: self.close_control,
            toggle_installed: false,
            panel_mounts: 0,
        })
    }
}

/// In-memory overlay instance.
pub struct HeadlessOverlay {
    options: OverlayOptions,
    elements: Vec<OverlayElement>,
    slides: Vec<Arc<HeadlessSlide>>,
    events: mpsc::UnboundedSender<OverlayEvent>,
    open: bool,
    active: usize,
    loaded: HashSet<usize>,
    close_control: bool,
    toggle_installed: bool,
    panel_mounts: usize,
}

impl HeadlessOverlay {
    /// Whether the overlay is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Options the overlay was created with.
    #[must_use]
    pub const fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Configured elements.
    #[must_use]
    pub fn elements(&self) -> &[OverlayElement] {
        &self.elements
    }

    /// Slide node at `index`.
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<Arc<HeadlessSlide>> {
        self.slides.get(index).cloned()
    }

    /// Whether the thumbnail toggle sits next to the close control.
    #[must_use]
    pub const fn has_thumbnail_toggle(&self) -> bool {
        self.toggle_installed
    }

    /// How many times the thumbnail panel was mounted.
    #[must_use]
    pub const fn panel_mounts(&self) -> usize {
        self.panel_mounts
    }

    fn emit(&self, event: OverlayEvent) {
        trace!(?event, "Overlay event");
        let _ = self.events.send(event);
    }

    fn load_slide(&mut self, index: usize) {
        if !self.loaded.insert(index) {
            return;
        }
        let slide = self
            .slides
            .get(index)
            .map(|slide| Arc::clone(slide) as Arc<dyn SlideNode>);
        self.emit(OverlayEvent::SlideLoaded(SlidePayload { index, slide }));
    }
}

impl OverlayDriver for HeadlessOverlay {
    fn active_slide_index(&self) -> usize {
        self.active
    }

    fn open_at(&mut self, index: usize) {
        if self.open || index >= self.elements.len() {
            return;
        }
        self.open = true;
        self.active = index;
        self.loaded.clear();
        self.emit(OverlayEvent::Opened);
        self.load_slide(index);
    }

    fn go_to_slide(&mut self, index: usize) {
        if !self.open || index == self.active || index >= self.elements.len() {
            return;
        }
        let previous = self.active;
        self.emit(OverlayEvent::BeforeSlideChange {
            previous,
            current: index,
        });
        self.active = index;
        self.load_slide(index);
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.toggle_installed = false;
        self.emit(OverlayEvent::Closed);
    }

    fn mount_thumbnail_panel(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.panel_mounts += 1;
        true
    }

    fn install_thumbnail_toggle(&mut self) -> ToggleInstall {
        if !self.close_control {
            ToggleInstall::NoCloseControl
        } else if self.toggle_installed {
            ToggleInstall::AlreadyPresent
        } else {
            self.toggle_installed = true;
            ToggleInstall::Installed
        }
    }
}
