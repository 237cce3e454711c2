//! Ports for slide content rendered by the overlay.

use std::sync::Arc;

use async_trait::async_trait;

/// Image element inside a slide.
#[async_trait]
pub trait SlideImage: Send + Sync {
    /// Current `src` attribute.
    fn src(&self) -> Option<String>;

    /// Whether the browser finished (or gave up) loading.
    fn is_complete(&self) -> bool;

    /// Intrinsic size in pixels; zero when nothing was decoded.
    fn natural_size(&self) -> (u32, u32);

    /// Assigns the `src` attribute.
    fn set_src(&self, src: &str);

    /// Resolves when the image fires its error event.
    async fn errored(&self);

    /// Resolves when the image fires its load event.
    async fn loaded(&self);
}

/// Slide container produced by the overlay.
pub trait SlideNode: Send + Sync {
    /// Image element of the slide, if any.
    fn image(&self) -> Option<Arc<dyn SlideImage>>;

    /// Text of the filename label, if present.
    fn filename_label(&self) -> Option<String>;

    /// Creates or updates the single filename label.
    fn set_filename_label(&self, text: &str);

    /// Removes the filename label.
    fn remove_filename_label(&self);
}
