//! Per-slide adjustments applied after the overlay loads a slide.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::ports::{SlideImage, SlidePayload};

/// Default delay before checking whether a slide image decoded.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(300);

/// Shows `title` as the slide's filename label, or removes the label when
/// `title` is empty.
pub fn render_filename(payload: &SlidePayload, title: &str) {
    let Some(slide) = &payload.slide else {
        return;
    };

    if title.is_empty() {
        if slide.filename_label().is_some() {
            slide.remove_filename_label();
        }
        return;
    }

    slide.set_filename_label(title);
}

/// Reloads the slide image once if it ends up with no decoded pixels.
///
/// Waits for the image's error event or `delay`, whichever comes first. An
/// image still loading after `delay` is watched until it either loads or
/// errors. Returns `None` when the slide has no image with a source.
pub fn ensure_image_loaded(
    payload: &SlidePayload,
    delay: Duration,
) -> Option<impl Future<Output = bool> + Send + 'static> {
    let image = payload.slide.as_ref()?.image()?;
    let src = image.src().filter(|src| !src.is_empty())?;
    let index = payload.index;

    Some(async move {
        tokio::select! {
            () = tokio::time::sleep(delay) => {
                if !image.is_complete() {
                    tokio::select! {
                        () = image.errored() => {}
                        () = image.loaded() => return false,
                    }
                }
            }
            () = image.errored() => {}
        }
        reload_if_broken(&image, &src, index).await
    })
}

async fn reload_if_broken(image: &Arc<dyn SlideImage>, src: &str, index: usize) -> bool {
    let (width, height) = image.natural_size();
    if !image.is_complete() || (width > 0 && height > 0) {
        return false;
    }

    debug!(index, src, "Reloading slide image");
    image.set_src("");
    // Reassign on the next turn of the event loop so the cleared source takes effect.
    tokio::task::yield_now().await;
    image.set_src(src);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::ports::SlideNode;
    use crate::infrastructure::headless::{HeadlessImage, HeadlessSlide};

    fn payload(slide: Arc<HeadlessSlide>) -> SlidePayload {
        SlidePayload {
            index: 0,
            slide: Some(slide as Arc<dyn SlideNode>),
        }
    }

    #[test]
    fn test_filename_label_created_then_updated() {
        let slide = Arc::new(HeadlessSlide::default());
        let payload = payload(Arc::clone(&slide));

        render_filename(&payload, "a.png");
        render_filename(&payload, "b.png");

        assert_eq!(slide.filename_label().as_deref(), Some("b.png"));
    }

    #[test]
    fn test_empty_title_removes_label() {
        let slide = Arc::new(HeadlessSlide::default());
        slide.set_filename_label("old.png");

        render_filename(&payload(Arc::clone(&slide)), "");

        assert_eq!(slide.filename_label(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_broken_image_is_reloaded_after_delay() {
        let image = Arc::new(HeadlessImage::broken("/attachments/download/1/a.png"));
        let slide = Arc::new(HeadlessSlide::with_image(Arc::clone(&image)));

        let reload = ensure_image_loaded(&payload(slide), DEFAULT_RETRY_DELAY).unwrap();

        assert!(reload.await);
        assert_eq!(
            image.src_assignments(),
            vec!["".to_string(), "/attachments/download/1/a.png".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_event_triggers_reload_once() {
        let image = Arc::new(HeadlessImage::pending("/attachments/download/1/a.png"));
        let slide = Arc::new(HeadlessSlide::with_image(Arc::clone(&image)));

        let reload = tokio::spawn(ensure_image_loaded(&payload(slide), Duration::from_secs(60)).unwrap());
        image.fail();

        assert!(reload.await.unwrap());
        assert_eq!(image.src_assignments().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_after_delay_still_reloads() {
        let image = Arc::new(HeadlessImage::pending("/attachments/download/1/a.png"));
        let slide = Arc::new(HeadlessSlide::with_image(Arc::clone(&image)));

        let reload = tokio::spawn(ensure_image_loaded(&payload(slide), DEFAULT_RETRY_DELAY).unwrap());
        tokio::time::sleep(Duration::from_millis(400)).await;
        image.fail();

        assert!(reload.await.unwrap());
        assert_eq!(
            image.src_assignments(),
            vec!["".to_string(), "/attachments/download/1/a.png".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_after_delay_needs_no_reload() {
        let image = Arc::new(HeadlessImage::pending("/attachments/download/1/a.png"));
        let slide = Arc::new(HeadlessSlide::with_image(Arc::clone(&image)));

        let reload = tokio::spawn(ensure_image_loaded(&payload(slide), DEFAULT_RETRY_DELAY).unwrap());
        tokio::time::sleep(Duration::from_millis(400)).await;
        image.finish_loading(640, 480);

        assert!(!reload.await.unwrap());
        assert!(image.src_assignments().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_decoded_image_is_left_alone() {
        let image = Arc::new(HeadlessImage::decoded("/attachments/download/1/a.png", 640, 480));
        let slide = Arc::new(HeadlessSlide::with_image(Arc::clone(&image)));

        let reload = ensure_image_loaded(&payload(slide), DEFAULT_RETRY_DELAY).unwrap();

        assert!(!reload.await);
        assert!(image.src_assignments().is_empty());
    }

    #[test]
    fn test_slide_without_image_needs_no_reload() {
        let slide = Arc::new(HeadlessSlide::default());
        assert!(ensure_image_loaded(&payload(slide), DEFAULT_RETRY_DELAY).is_none());
    }
}
