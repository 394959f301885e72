//! Token cache backends for persisting the bearer token.
//!
//! Provides an in-memory cache for tests and embedded use, and a JSON-file
//! cache that survives process restarts.

pub mod file;
pub mod memory;

pub use file::FileTokenCache;
pub use memory::InMemoryTokenCache;
