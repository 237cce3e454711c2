//! Infrastructure layer with external service adapters.

/// Session cache adapters.
pub mod cache;
/// Application configuration.
pub mod config;
/// Browser-free overlay, history and panel adapters.
pub mod headless;
/// Redmine HTTP client.
pub mod http;

pub use cache::{FileSessionCache, MemorySessionCache};
pub use config::{AppConfig, CacheMode, CliArgs, LogLevel};
pub use headless::{HeadlessOverlayProvider, MemoryHistory, StripSurface};
pub use http::RedmineClient;
