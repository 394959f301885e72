//! In-memory token cache backed by a `HashMap` behind a `Mutex`.

use async_trait::async_trait;
use etims_types::{CachedToken, Environment, TokenCache, traits::Result};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// An in-memory [`TokenCache`] implementation for testing and ephemeral use.
#[derive(Default)]
pub struct InMemoryTokenCache {
    data: Mutex<HashMap<Environment, CachedToken>>,
}

impl InMemoryTokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-seeded with `token` for `env`.
    #[must_use]
    pub fn with_token(env: Environment, token: CachedToken) -> Self {
        let cache = Self::new();
        cache
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(env, token);
        cache
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn load(&self, env: Environment) -> Option<CachedToken> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&env)
            .cloned()
    }

    async fn store(&self, env: Environment, token: &CachedToken) -> Result<()> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(env, token.clone());
        Ok(())
    }

    async fn clear(&self, env: Environment) -> Result<()> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&env);
        Ok(())
    }
}
