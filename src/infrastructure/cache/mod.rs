//! Session cache adapters.

pub mod file_session_cache;
pub mod memory_session_cache;

pub use file_session_cache::FileSessionCache;
pub use memory_session_cache::MemorySessionCache;
