//! Domain error types.

mod lightbox_error;
mod resolve_error;

pub use lightbox_error::LightboxError;
pub use resolve_error::ResolveError;
