mod attachment_source_port;
mod history_port;
mod overlay_port;
mod panel_surface_port;
mod session_cache_port;
mod slide_port;

pub use attachment_source_port::AttachmentSourcePort;
pub use history_port::HistoryPort;
pub use overlay_port::{
    OverlayDriver, OverlayEvent, OverlayOptions, OverlayProvider, SlideEffect, SlidePayload,
    ToggleInstall,
};
pub use panel_surface_port::{PanelSurface, Span, ThumbnailButton};
pub use session_cache_port::{CACHE_KEY_PREFIX, SessionCachePort};
pub use slide_port::{SlideImage, SlideNode};
