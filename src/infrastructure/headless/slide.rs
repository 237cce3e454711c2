//! In-memory slide nodes.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::entities::{OverlayElement, OverlayElementKind};
use crate::domain::ports::{SlideImage, SlideNode};

#[derive(Debug, Default)]
struct ImageState {
    src: Option<String>,
    complete: bool,
    natural_size: (u32, u32),
    assignments: Vec<String>,
}

/// Image element whose load state is set by the caller.
#[derive(Debug, Default)]
pub struct HeadlessImage {
    state: Mutex<ImageState>,
    error: Notify,
    load: Notify,
}

impl HeadlessImage {
    /// Image still loading `src`.
    #[must_use]
    pub fn pending(src: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ImageState {
                src: Some(src.into()),
                ..ImageState::default()
            }),
            error: Notify::new(),
            load: Notify::new(),
        }
    }

    /// Image that finished loading without decoding anything.
    #[must_use]
    pub fn broken(src: impl Into<String>) -> Self {
        let image = Self::pending(src);
        image.state.lock().complete = true;
        image
    }

    /// Image decoded at the given size.
    #[must_use]
    pub fn decoded(src: impl Into<String>, width: u32, height: u32) -> Self {
        let image = Self::pending(src);
        {
            let mut state = image.state.lock();
            state.complete = true;
            state.natural_size = (width, height);
        }
        image
    }

    /// Fires the error event.
    pub fn fail(&self) {
        self.state.lock().complete = true;
        self.error.notify_one();
    }

    /// Fires the load event after decoding at the given size.
    pub fn finish_loading(&self, width: u32, height: u32) {
        {
            let mut state = self.state.lock();
            state.complete = true;
            state.natural_size = (width, height);
        }
        self.load.notify_one();
    }

    /// Every value assigned through [`SlideImage::set_src`], in order.
    #[must_use]
    pub fn src_assignments(&self) -> Vec<String> {
        self.state.lock().assignments.clone()
    }
}

#[async_trait]
impl SlideImage for HeadlessImage {
    fn src(&self) -> Option<String> {
        self.state.lock().src.clone()
    }

    fn is_complete(&self) -> bool {
        self.state.lock().complete
    }

    fn natural_size(&self) -> (u32, u32) {
        self.state.lock().natural_size
    }

    fn set_src(&self, src: &str) {
        let mut state = self.state.lock();
        state.src = Some(src.to_string());
        state.assignments.push(src.to_string());
        state.complete = false;
    }

    async fn errored(&self) {
        self.error.notified().await;
    }

    async fn loaded(&self) {
        self.load.notified().await;
    }
}

/// Slide container with an optional image and filename label.
#[derive(Debug, Default)]
pub struct HeadlessSlide {
    image: Option<Arc<HeadlessImage>>,
    label: Mutex<Option<String>>,
}

impl HeadlessSlide {
    /// Slide for an overlay element; image elements get a pending image.
    #[must_use]
    pub fn for_element(element: &OverlayElement) -> Self {
        let image = match (element.kind, &element.href) {
            (OverlayElementKind::Image, Some(href)) => Some(Arc::new(HeadlessImage::pending(href))),
            _ => None,
        };
        Self {
            image,
            label: Mutex::new(None),
        }
    }

    /// Slide showing `image`.
    #[must_use]
    pub fn with_image(image: Arc<HeadlessImage>) -> Self {
        Self {
            image: Some(image),
            label: Mutex::new(None),
        }
    }

    /// Concrete image of the slide.
    #[must_use]
    pub fn headless_image(&self) -> Option<Arc<HeadlessImage>> {
        self.image.clone()
    }
}

impl SlideNode for HeadlessSlide {
    fn image(&self) -> Option<Arc<dyn SlideImage>> {
        self.image
            .as_ref()
            .map(|image| Arc::clone(image) as Arc<dyn SlideImage>)
    }

    fn filename_label(&self) -> Option<String> {
        self.label.lock().clone()
    }

    fn set_filename_label(&self, text: &str) {
        *self.label.lock() = Some(text.to_string());
    }

    fn remove_filename_label(&self) {
        *self.label.lock() = None;
    }
}
