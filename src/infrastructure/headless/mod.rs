//! Browser-free adapters for the overlay, history and thumbnail strip.

pub mod history;
pub mod overlay;
pub mod panel_surface;
pub mod slide;

pub use history::{HistoryWrite, MemoryHistory};
pub use overlay::{HeadlessOverlay, HeadlessOverlayProvider};
pub use panel_surface::StripSurface;
pub use slide::{HeadlessImage, HeadlessSlide};
