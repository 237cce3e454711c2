//! Keeps the overlay, the address bar and the thumbnail strip in agreement.
//!
//! The overlay reports its lifecycle through an event channel. Every public
//! operation forwards to the driver and then drains that channel, so the
//! history writes an operation causes have happened once it returns.

use std::mem;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use super::page_wiring::{ClickOutcome, PageWiring};
use super::slide_decorator::{ensure_image_loaded, render_filename};
use super::thumbnail_panel::ThumbnailPanel;
use crate::application::dto::Gallery;
use crate::application::services::query_param::{read_param, with_attachment_param};
use crate::domain::entities::AttachmentId;
use crate::domain::ports::{
    HistoryPort, OverlayDriver, OverlayEvent, PanelSurface, SlidePayload, ToggleInstall,
};

/// Flags shared by the overlay callbacks and the browser event handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Slide last reported by the overlay; `None` until it first opens.
    pub active_index: Option<usize>,
    /// Whether the overlay is visible.
    pub is_open: bool,
    /// The next open comes from history traversal and must not push.
    pub history_driven: bool,
    /// The pending close comes from history traversal and must not push.
    pub closing_from_history: bool,
}

#[derive(Debug, Clone, Copy)]
enum UrlWrite {
    Push,
    Replace,
}

/// Overlay state machine for one page.
pub struct NavigationSynchronizer<D, H, S>
where
    D: OverlayDriver,
    H: HistoryPort,
    S: PanelSurface,
{
    gallery: Gallery,
    driver: D,
    history: H,
    panel: ThumbnailPanel<S>,
    wiring: PageWiring,
    state: NavigationState,
    overlay_events: mpsc::UnboundedReceiver<OverlayEvent>,
    panel_clicks: mpsc::UnboundedReceiver<usize>,
    reloads: JoinSet<bool>,
    query_param: String,
    image_retry_delay: Duration,
}

impl<D, H, S> NavigationSynchronizer<D, H, S>
where
    D: OverlayDriver,
    H: HistoryPort,
    S: PanelSurface,
{
    /// Wires the panel's thumbnail clicks to the overlay.
    ///
    /// `overlay_events` must be the receiving end of the channel `driver`
    /// was created with.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        gallery: Gallery,
        driver: D,
        overlay_events: mpsc::UnboundedReceiver<OverlayEvent>,
        history: H,
        mut panel: ThumbnailPanel<S>,
        wiring: PageWiring,
        query_param: impl Into<String>,
        image_retry_delay: Duration,
    ) -> Self {
        let (click_tx, panel_clicks) = mpsc::unbounded_channel();
        panel.on_thumbnail_click(move |index| {
            let _ = click_tx.send(index);
        });

        Self {
            gallery,
            driver,
            history,
            panel,
            wiring,
            state: NavigationState::default(),
            overlay_events,
            panel_clicks,
            reloads: JoinSet::new(),
            query_param: query_param.into(),
            image_retry_delay,
        }
    }

    /// Opens the overlay at `index`.
    pub fn open_at(&mut self, index: usize) {
        if index >= self.gallery.len() {
            return;
        }
        self.driver.open_at(index);
        self.pump();
    }

    /// Moves the open overlay to `index`.
    pub fn go_to_slide(&mut self, index: usize) {
        self.driver.go_to_slide(index);
        self.pump();
    }

    /// Closes the overlay on user request.
    pub fn close(&mut self) {
        self.driver.close();
        self.pump();
    }

    /// Delivers a click on page element `element`.
    pub fn click_element(&mut self, element: usize) -> ClickOutcome {
        let outcome = self.wiring.click(element);
        if let ClickOutcome::Intercepted { slide } = outcome {
            debug!(element, slide, "Intercepted attachment click");
            self.open_at(slide);
        }
        outcome
    }

    /// Delivers a click on thumbnail `index`.
    ///
    /// Returns false when there is no such thumbnail.
    pub fn click_thumbnail(&mut self, index: usize) -> bool {
        let clicked = self.panel.click(index);
        self.pump();
        clicked
    }

    /// Collapses or expands the thumbnail strip. Returns the new collapsed state.
    pub fn toggle_thumbnails(&mut self) -> bool {
        self.panel.toggle_collapsed()
    }

    /// Reacts to the browser moving through history.
    pub fn handle_pop_state(&mut self) {
        let location = self.history.location();

        let Some(raw) = read_param(&location, &self.query_param) else {
            if self.state.is_open {
                debug!("Query parameter gone, closing overlay");
                self.state.closing_from_history = true;
                self.driver.close();
                self.pump();
            }
            return;
        };

        let Some(index) = self.slide_for(&raw) else {
            trace!(value = %raw, "Ignoring unrecognized attachment in history entry");
            return;
        };

        if self.state.is_open {
            self.go_to_slide(index);
        } else {
            self.state.history_driven = true;
            self.open_at(index);
        }
    }

    /// Reacts to a page show; `persisted` pages came from the back/forward cache.
    pub fn handle_page_show(&mut self, persisted: bool) {
        if persisted {
            self.state.history_driven = true;
        }
    }

    /// Opens the slide named by the address bar after `delay`.
    ///
    /// Returns the opened slide, or `None` when the parameter is absent or
    /// names an attachment outside the gallery.
    pub async fn open_from_initial_url(&mut self, delay: Duration) -> Option<usize> {
        let raw = read_param(&self.history.location(), &self.query_param)?;
        let Some(index) = self.slide_for(&raw) else {
            trace!(value = %raw, "Initial attachment not in gallery");
            return None;
        };

        tokio::time::sleep(delay).await;
        self.open_at(index);
        Some(index)
    }

    /// Waits for pending image reloads. Returns how many slides were reloaded.
    ///
    /// Checks for images still loading finish once they load or fail, or when
    /// the overlay closes.
    pub async fn wait_for_reloads(&mut self) -> usize {
        let mut reloaded = 0;
        while let Some(result) = self.reloads.join_next().await {
            match result {
                Ok(true) => reloaded += 1,
                Ok(false) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => warn!(error = %err, "Image reload task failed"),
            }
        }
        reloaded
    }

    /// Slides shown by the overlay.
    #[must_use]
    pub const fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Overlay driver.
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Browser history.
    #[must_use]
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Mutable browser history, for simulating traversal.
    pub const fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Thumbnail strip.
    #[must_use]
    pub const fn panel(&self) -> &ThumbnailPanel<S> {
        &self.panel
    }

    /// Page click wiring.
    #[must_use]
    pub const fn wiring(&self) -> &PageWiring {
        &self.wiring
    }

    /// Navigation flags.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    fn slide_for(&self, raw: &str) -> Option<usize> {
        let id: AttachmentId = raw.parse().ok()?;
        self.gallery.index_of(id)
    }

    fn pump(&mut self) {
        loop {
            while let Ok(event) = self.overlay_events.try_recv() {
                self.on_overlay_event(event);
            }
            let Ok(index) = self.panel_clicks.try_recv() else {
                break;
            };
            if self.state.is_open {
                self.driver.go_to_slide(index);
            } else {
                self.driver.open_at(index);
            }
        }
    }

    fn on_overlay_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::Opened => self.on_open(),
            OverlayEvent::BeforeSlideChange { current, .. } => {
                self.state.active_index = Some(current);
                self.panel.set_active(current);
                self.write_url(self.gallery.id_at(current), UrlWrite::Replace);
            }
            OverlayEvent::SlideLoaded(payload) => self.on_slide_loaded(&payload),
            OverlayEvent::Closed => {
                self.state.is_open = false;
                self.reloads.abort_all();
                if !mem::take(&mut self.state.closing_from_history) {
                    self.write_url(None, UrlWrite::Push);
                }
            }
        }
    }

    fn on_open(&mut self) {
        self.state.is_open = true;

        if !self.driver.mount_thumbnail_panel() {
            debug!("Overlay container missing, thumbnail panel not mounted");
        }
        match self.driver.install_thumbnail_toggle() {
            ToggleInstall::Installed => trace!("Installed thumbnail toggle"),
            ToggleInstall::AlreadyPresent => {}
            ToggleInstall::NoCloseControl => debug!("No close control for thumbnail toggle"),
        }

        let index = self.driver.active_slide_index();
        self.state.active_index = Some(index);
        self.panel.set_active(index);

        let write = if mem::take(&mut self.state.history_driven) {
            UrlWrite::Replace
        } else {
            UrlWrite::Push
        };
        self.write_url(self.gallery.id_at(index), write);
    }

    fn on_slide_loaded(&mut self, payload: &SlidePayload) {
        let title = self
            .gallery
            .descriptor(payload.index)
            .map_or("", |descriptor| descriptor.title());
        render_filename(payload, title);

        let Some(reload) = ensure_image_loaded(payload, self.image_retry_delay) else {
            return;
        };
        match Handle::try_current() {
            Ok(handle) => {
                self.reloads.spawn_on(reload, &handle);
            }
            Err(_) => trace!(index = payload.index, "No runtime, skipping image reload check"),
        }
    }

    fn write_url(&mut self, id: Option<AttachmentId>, write: UrlWrite) {
        let url = with_attachment_param(&self.history.location(), &self.query_param, id);
        trace!(url = %url, ?write, "Updating address bar");
        match write {
            UrlWrite::Push => self.history.push_state(&url, id),
            UrlWrite::Replace => self.history.replace_state(&url, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::query_param::read_attachment_param;
    use crate::domain::entities::{ContentDescriptor, PageContext, PageElement, PageScan};
    use crate::domain::ports::{OverlayOptions, OverlayProvider, SlideNode};
    use crate::infrastructure::headless::{
        HeadlessOverlay, HeadlessOverlayProvider, HistoryWrite, MemoryHistory, StripSurface,
    };

    const PAGE_URL: &str = "https://redmine.example/issues/1";

    type Synchronizer = NavigationSynchronizer<HeadlessOverlay, MemoryHistory, StripSurface>;

    fn image(id: u64) -> ContentDescriptor {
        ContentDescriptor::Image {
            id: AttachmentId::new(id),
            href: format!("/attachments/download/{id}/f{id}.png"),
            title: format!("f{id}.png"),
            thumb_url: format!("/attachments/thumbnail/{id}/200"),
        }
    }

    fn synchronizer_with(provider: &HeadlessOverlayProvider, url: &str, ids: &[u64]) -> Synchronizer {
        let gallery = Gallery::new(ids.iter().copied().map(image).collect());
        let page = PageScan::new(
            PageContext::default(),
            ids.iter()
                .map(|id| PageElement::link(format!("/attachments/{id}"), "details"))
                .collect(),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = provider
            .create(&OverlayOptions::default(), gallery.overlay_elements(), tx)
            .unwrap();
        let panel = ThumbnailPanel::build(StripSurface::default(), gallery.descriptors());
        let wiring = PageWiring::wire(&page, &gallery);

        NavigationSynchronizer::new(
            gallery,
            driver,
            rx,
            MemoryHistory::new(url),
            panel,
            wiring,
            "glightbox",
            Duration::from_millis(300),
        )
    }

    fn synchronizer_at(url: &str, ids: &[u64]) -> Synchronizer {
        synchronizer_with(&HeadlessOverlayProvider::new(), url, ids)
    }

    fn synchronizer(ids: &[u64]) -> Synchronizer {
        synchronizer_at(PAGE_URL, ids)
    }

    #[test]
    fn test_open_pushes_and_syncs_panel() {
        let mut sync = synchronizer(&[3, 7, 9]);

        sync.open_at(1);

        assert!(sync.state().is_open);
        assert_eq!(sync.history().location(), "https://redmine.example/issues/1?glightbox=7");
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
        assert_eq!(sync.panel().active(), Some(1));
        assert_eq!(sync.driver().panel_mounts(), 1);
        assert!(sync.driver().has_thumbnail_toggle());
    }

    #[test]
    fn test_active_index_unset_until_first_open() {
        let mut sync = synchronizer(&[3, 7]);
        assert_eq!(sync.state().active_index, None);

        sync.open_at(0);
        assert_eq!(sync.state().active_index, Some(0));

        sync.go_to_slide(1);
        assert_eq!(sync.state().active_index, Some(1));
    }

    #[test]
    fn test_open_without_close_control_still_syncs() {
        let provider = HeadlessOverlayProvider::new().without_close_control();
        let mut sync = synchronizer_with(&provider, PAGE_URL, &[3, 7]);

        sync.open_at(1);

        assert!(sync.state().is_open);
        assert!(!sync.driver().has_thumbnail_toggle());
        assert_eq!(sync.driver().panel_mounts(), 1);
        assert_eq!(sync.panel().active(), Some(1));
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
        assert_eq!(sync.history().location(), "https://redmine.example/issues/1?glightbox=7");
    }

    #[test]
    fn test_opening_again_while_open_leaves_history_alone() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(0);
        let writes = sync.history().writes().len();

        sync.open_at(0);
        let outcome = sync.click_element(0);

        assert_eq!(outcome, ClickOutcome::Intercepted { slide: 0 });
        assert!(sync.state().is_open);
        assert_eq!(sync.state().active_index, Some(0));
        assert_eq!(sync.history().writes().len(), writes);
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
    }

    #[test]
    fn test_bfcache_restore_then_back_opens_with_replace() {
        let mut sync = synchronizer(&[3, 7]);
        sync.handle_page_show(true);
        sync.history_mut()
            .push_state("https://redmine.example/issues/1?glightbox=7", None);

        sync.handle_pop_state();

        assert!(sync.state().is_open);
        assert_eq!(sync.driver().active_slide_index(), 1);
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
        assert_eq!(sync.history().count(HistoryWrite::Replace), 1);
        assert!(!sync.state().history_driven);

        sync.close();
        sync.open_at(0);
        assert_eq!(sync.history().count(HistoryWrite::Push), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_round_trip_reopens_same_slide() {
        let mut first = synchronizer(&[3, 7, 9]);
        first.open_at(2);
        let url = first.history().location();
        assert_eq!(read_attachment_param(&url, "glightbox"), Some(AttachmentId::new(9)));

        let mut second = synchronizer_at(&url, &[3, 7, 9]);
        let opened = second.open_from_initial_url(Duration::from_millis(100)).await;

        assert_eq!(opened, Some(2));
        assert_eq!(second.driver().active_slide_index(), 2);
    }

    #[test]
    fn test_slide_changes_only_replace() {
        let mut sync = synchronizer(&[3, 7, 9]);

        sync.open_at(0);
        sync.go_to_slide(1);
        sync.go_to_slide(2);
        sync.go_to_slide(0);

        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
        assert_eq!(sync.history().count(HistoryWrite::Replace), 3);
        assert_eq!(sync.history().len(), 2);
        assert_eq!(sync.history().location(), "https://redmine.example/issues/1?glightbox=3");
    }

    #[test]
    fn test_open_and_user_close_push_once_each() {
        let mut sync = synchronizer(&[3, 7]);

        sync.open_at(1);
        sync.close();

        assert!(!sync.state().is_open);
        assert_eq!(sync.history().count(HistoryWrite::Push), 2);
        assert_eq!(sync.history().count(HistoryWrite::Replace), 0);
        assert_eq!(sync.history().location(), PAGE_URL);
    }

    #[test]
    fn test_back_to_known_id_while_closed_opens_with_replace() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(1);
        sync.close();
        assert!(sync.history_mut().back());

        sync.handle_pop_state();

        assert!(sync.state().is_open);
        assert_eq!(sync.driver().active_slide_index(), 1);
        assert_eq!(sync.history().count(HistoryWrite::Push), 2);
        assert_eq!(sync.history().count(HistoryWrite::Replace), 1);
        assert_eq!(sync.history().len(), 3);
        assert!(!sync.state().history_driven);
    }

    #[test]
    fn test_back_without_param_closes_without_push() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(0);
        assert!(sync.history_mut().back());

        sync.handle_pop_state();

        assert!(!sync.state().is_open);
        assert!(!sync.state().closing_from_history);
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
    }

    #[test]
    fn test_forward_while_open_moves_slide() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(0);
        sync.go_to_slide(1);
        sync.history_mut()
            .push_state("https://redmine.example/issues/1?glightbox=3", None);

        sync.handle_pop_state();

        assert!(sync.state().is_open);
        assert_eq!(sync.driver().active_slide_index(), 0);
        assert_eq!(sync.panel().active(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_id_is_inert() {
        let unknown = "https://redmine.example/issues/1?glightbox=123456";
        let mut sync = synchronizer_at(unknown, &[3, 7]);

        assert_eq!(sync.open_from_initial_url(Duration::from_millis(100)).await, None);
        sync.handle_pop_state();
        assert!(!sync.state().is_open);
        assert!(sync.history().writes().is_empty());

        sync.open_at(0);
        sync.history_mut().push_state(unknown, None);
        let writes = sync.history().writes().len();
        sync.handle_pop_state();

        assert!(sync.state().is_open);
        assert_eq!(sync.driver().active_slide_index(), 0);
        assert_eq!(sync.history().writes().len(), writes);
    }

    #[test]
    fn test_bfcache_restore_makes_next_open_replace() {
        let mut sync = synchronizer(&[3, 7]);

        sync.handle_page_show(true);
        sync.open_at(0);

        assert_eq!(sync.history().count(HistoryWrite::Push), 0);
        assert_eq!(sync.history().count(HistoryWrite::Replace), 1);
    }

    #[test]
    fn test_regular_page_show_keeps_push() {
        let mut sync = synchronizer(&[3]);

        sync.handle_page_show(false);
        sync.open_at(0);

        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
    }

    #[test]
    fn test_thumbnail_click_changes_slide() {
        let mut sync = synchronizer(&[3, 7, 9]);
        sync.open_at(0);

        assert!(sync.click_thumbnail(2));
        assert!(!sync.click_thumbnail(5));

        assert_eq!(sync.driver().active_slide_index(), 2);
        assert_eq!(sync.panel().active(), Some(2));
        assert_eq!(sync.history().location(), "https://redmine.example/issues/1?glightbox=9");
        assert_eq!(sync.history().count(HistoryWrite::Push), 1);
    }

    #[test]
    fn test_toggle_installed_once_and_collapse_keeps_active() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(1);
        sync.close();
        sync.open_at(0);

        assert!(sync.driver().has_thumbnail_toggle());
        assert!(sync.toggle_thumbnails());
        assert!(sync.panel().is_collapsed());
        assert_eq!(sync.panel().active(), Some(0));
        assert!(!sync.toggle_thumbnails());
    }

    #[test]
    fn test_page_click_opens_slide() {
        let mut sync = synchronizer(&[3, 7]);

        let outcome = sync.click_element(1);

        assert_eq!(outcome, ClickOutcome::Intercepted { slide: 1 });
        assert!(sync.state().is_open);
        assert_eq!(sync.driver().active_slide_index(), 1);
    }

    #[test]
    fn test_loaded_slide_gets_filename_label() {
        let mut sync = synchronizer(&[3, 7]);

        sync.open_at(1);

        let slide = sync.driver().slide(1).unwrap();
        assert_eq!(slide.filename_label().as_deref(), Some("f7.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_slide_image_is_reloaded() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(0);

        let image = sync.driver().slide(0).unwrap().headless_image().unwrap();
        image.fail();

        assert_eq!(sync.wait_for_reloads().await, 1);
        assert_eq!(
            image.src_assignments(),
            vec![String::new(), "/attachments/download/3/f3.png".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_abandons_pending_image_checks() {
        let mut sync = synchronizer(&[3, 7]);
        sync.open_at(0);
        let image = sync.driver().slide(0).unwrap().headless_image().unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;

        sync.close();

        assert_eq!(sync.wait_for_reloads().await, 0);
        assert!(image.src_assignments().is_empty());
    }
}
