//! Data transfer objects for the application layer.

mod gallery_dto;

pub use gallery_dto::{Gallery, ResolutionSource, ResolvedAttachment};
