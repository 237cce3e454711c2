//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{AttachmentId, AttachmentRecord, ContentDescriptor, MediaKind, PageScan};
pub use errors::{LightboxError, ResolveError};
