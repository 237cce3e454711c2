//! Lightbox runtime: overlay wiring, thumbnail strip and history sync.

pub mod navigation;
pub mod page_wiring;
pub mod slide_decorator;
pub mod thumbnail_panel;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub use navigation::{NavigationState, NavigationSynchronizer};
pub use page_wiring::{ClickOutcome, ClickTarget, PageWiring};
pub use thumbnail_panel::ThumbnailPanel;

use crate::application::dto::Gallery;
use crate::application::services::query_param::DEFAULT_QUERY_PARAM;
use crate::application::use_cases::BuildGalleryUseCase;
use crate::domain::entities::PageScan;
use crate::domain::errors::LightboxError;
use crate::domain::ports::{HistoryPort, OverlayOptions, OverlayProvider, PanelSurface};
use crate::infrastructure::config::LightboxConfig;

/// Runtime settings of the lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxSettings {
    /// Query parameter holding the open attachment id.
    pub query_param: String,
    /// Delay before honoring the parameter on first render.
    pub initial_open_delay: Duration,
    /// Delay before checking whether a slide image decoded.
    pub image_retry_delay: Duration,
    /// Extra scroll when revealing a clipped thumbnail.
    pub scroll_margin: f64,
    /// Overlay feature flags.
    pub overlay: OverlayOptions,
}

impl Default for LightboxSettings {
    fn default() -> Self {
        Self {
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            initial_open_delay: Duration::from_millis(100),
            image_retry_delay: slide_decorator::DEFAULT_RETRY_DELAY,
            scroll_margin: thumbnail_panel::DEFAULT_SCROLL_MARGIN,
            overlay: OverlayOptions::default(),
        }
    }
}

impl From<&LightboxConfig> for LightboxSettings {
    fn from(config: &LightboxConfig) -> Self {
        Self {
            query_param: config.query_param.clone(),
            initial_open_delay: config.initial_open_delay(),
            image_retry_delay: config.image_retry_delay(),
            scroll_margin: config.thumbnail_scroll_margin,
            overlay: OverlayOptions {
                slide_effect: config.slide_effect,
                ..OverlayOptions::default()
            },
        }
    }
}

/// Builds the gallery for `page` and mounts the lightbox on it.
///
/// Nothing is resolved when the overlay widget is missing.
///
/// # Errors
/// Returns [`LightboxError::CollaboratorMissing`] when the overlay is not
/// available and [`LightboxError::EmptyResult`] when the page has nothing to
/// show.
pub async fn initialize<P, H, S>(
    provider: &P,
    use_case: &BuildGalleryUseCase,
    page: &PageScan,
    history: H,
    surface: S,
    settings: &LightboxSettings,
) -> Result<NavigationSynchronizer<P::Driver, H, S>, LightboxError>
where
    P: OverlayProvider,
    H: HistoryPort,
    S: PanelSurface,
{
    ensure_available(provider)?;
    let gallery = use_case.execute(page).await?;
    mount(provider, gallery, page, history, surface, settings)
}

/// Mounts the lightbox for an already built gallery.
///
/// # Errors
/// Returns error if the overlay is missing or rejects its configuration, or
/// the gallery is empty.
pub fn mount<P, H, S>(
    provider: &P,
    gallery: Gallery,
    page: &PageScan,
    history: H,
    surface: S,
    settings: &LightboxSettings,
) -> Result<NavigationSynchronizer<P::Driver, H, S>, LightboxError>
where
    P: OverlayProvider,
    H: HistoryPort,
    S: PanelSurface,
{
    ensure_available(provider)?;
    if gallery.is_empty() {
        return Err(LightboxError::EmptyResult);
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let driver = provider.create(&settings.overlay, gallery.overlay_elements(), events_tx)?;

    let panel = ThumbnailPanel::build(surface, gallery.descriptors())
        .with_scroll_margin(settings.scroll_margin);
    let wiring = PageWiring::wire(page, &gallery);
    debug!(targets = wiring.targets().len(), "Wired page elements");
    info!(slides = gallery.len(), "Lightbox ready");

    Ok(NavigationSynchronizer::new(
        gallery,
        driver,
        events_rx,
        history,
        panel,
        wiring,
        settings.query_param.clone(),
        settings.image_retry_delay,
    ))
}

fn ensure_available<P: OverlayProvider>(provider: &P) -> Result<(), LightboxError> {
    if provider.is_available() {
        Ok(())
    } else {
        warn!("Overlay widget not loaded, lightbox disabled");
        Err(LightboxError::collaborator_missing("overlay widget not loaded"))
    }
}
