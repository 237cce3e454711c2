//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateless services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{Gallery, ResolutionSource, ResolvedAttachment};
pub use use_cases::{BuildGalleryUseCase, ResolveAttachmentsUseCase};
