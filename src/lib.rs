//! Redmine GLightbox - an attachment lightbox for Redmine issue pages.
//!
//! This crate discovers the attachments referenced on a rendered page, resolves
//! each one to a downloadable file and drives a full-screen overlay whose open
//! slide is mirrored into the page URL and session history.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the lightbox runtime.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "redmine-glightbox";
