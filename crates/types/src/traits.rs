//! Async traits shared across etims crates.
//!
//! Cross-crate seams live here so that higher layers depend only on
//! `etims-types`, not on each other.

use crate::{CachedToken, Environment};
use async_trait::async_trait;

pub use crate::error::Result;

/// Durable home of the bearer token, keyed by environment.
///
/// Reads are optimistic: implementations report a missing, unreadable or
/// corrupt record as `None` rather than an error.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Load the cached token for `env`, if one is present and decodable.
    async fn load(&self, env: Environment) -> Option<CachedToken>;
    /// Persist `token` for `env`, overwriting any prior record.
    async fn store(&self, env: Environment, token: &CachedToken) -> Result<()>;
    /// Drop the record for `env`. Removing an absent record is not an error.
    async fn clear(&self, env: Environment) -> Result<()>;
}
