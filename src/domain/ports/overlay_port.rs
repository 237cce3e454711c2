//! Port definition for the full-screen overlay widget.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::entities::OverlayElement;
use crate::domain::errors::LightboxError;

use super::SlideNode;

/// Transition used between slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideEffect {
    /// Cross-fade.
    #[default]
    Fade,
    /// Horizontal slide.
    Slide,
    /// Zoom in/out.
    Zoom,
}

/// Feature flags passed to the overlay on creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct OverlayOptions {
    /// Swipe between slides.
    pub touch_navigation: bool,
    /// Wrap from the last slide to the first.
    #[serde(rename = "loop")]
    pub loop_slides: bool,
    /// Start videos automatically.
    pub autoplay_videos: bool,
    /// Load neighbouring slides ahead of time.
    pub preload: bool,
    /// Transition effect.
    pub slide_effect: SlideEffect,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            touch_navigation: true,
            loop_slides: false,
            autoplay_videos: false,
            preload: false,
            slide_effect: SlideEffect::Fade,
        }
    }
}

/// Payload of the slide-loaded callback.
#[derive(Clone)]
pub struct SlidePayload {
    /// Index of the loaded slide.
    pub index: usize,
    /// Slide node, if the overlay exposes it.
    pub slide: Option<Arc<dyn SlideNode>>,
}

impl std::fmt::Debug for SlidePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidePayload")
            .field("index", &self.index)
            .field("has_slide", &self.slide.is_some())
            .finish()
    }
}

/// Lifecycle callbacks emitted by the overlay.
#[derive(Debug, Clone)]
pub enum OverlayEvent {
    /// Overlay became visible.
    Opened,
    /// Active slide is about to change.
    BeforeSlideChange {
        /// Slide being left.
        previous: usize,
        /// Slide being shown.
        current: usize,
    },
    /// A slide finished loading.
    SlideLoaded(SlidePayload),
    /// Overlay was closed.
    Closed,
}

/// Result of installing the thumbnail toggle next to the close control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleInstall {
    /// The control was added.
    Installed,
    /// A toggle control already exists.
    AlreadyPresent,
    /// The overlay has no close control to anchor on.
    NoCloseControl,
}

/// Running overlay instance.
///
/// Implementations report lifecycle callbacks through the event sender they
/// were created with. Events caused by a method call must be queued before
/// that call returns.
pub trait OverlayDriver {
    /// Index of the slide currently shown.
    fn active_slide_index(&self) -> usize;

    /// Opens the overlay at `index`.
    fn open_at(&mut self, index: usize);

    /// Moves an open overlay to `index`.
    fn go_to_slide(&mut self, index: usize);

    /// Closes the overlay.
    fn close(&mut self);

    /// Appends the thumbnail panel to the overlay container.
    ///
    /// Returns false when the container cannot be found.
    fn mount_thumbnail_panel(&mut self) -> bool;

    /// Inserts the thumbnail toggle before the close control, once.
    fn install_thumbnail_toggle(&mut self) -> ToggleInstall;
}

/// Factory for overlay instances, standing in for the widget's constructor.
pub trait OverlayProvider {
    /// Overlay type produced.
    type Driver: OverlayDriver;

    /// Whether the widget is loaded at all.
    fn is_available(&self) -> bool;

    /// Creates an overlay showing `elements`.
    ///
    /// # Errors
    /// Returns error if the widget rejects its configuration.
    fn create(
        &self,
        options: &OverlayOptions,
        elements: Vec<OverlayElement>,
        events: mpsc::UnboundedSender<OverlayEvent>,
    ) -> Result<Self::Driver, LightboxError>;
}
