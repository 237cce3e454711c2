//! HTTP adapters.

pub mod redmine_client;

pub use redmine_client::{PageFetchError, RedmineClient};
