//! Presentation layer with the lightbox runtime.

/// Overlay, thumbnail strip and history synchronization.
pub mod lightbox;

pub use lightbox::{LightboxSettings, NavigationSynchronizer, initialize};
