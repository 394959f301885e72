//! Bearer token lifecycle for one environment.
//!
//! Responsibilities:
//! - Serve the cached token while it is unexpired (no network).
//! - Fetch a new token via the client-credentials grant when the cache
//!   misses, the token expired, or the caller forces a refresh.
//! - Serialize refreshes so concurrent callers share one grant.
use crate::client_credentials::{basic_authorization, parse_token_response, token_url};
use etims_config::{Config, Credentials};
use etims_types::{CachedToken, Environment, EtimsError, TokenCache, traits::Result};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct TokenManager {
    http: reqwest::Client,
    env: Environment,
    token_url: String,
    credentials: Option<Credentials>,
    cache: Arc<dyn TokenCache>,
    /// Held for the duration of a network refresh.
    refresh: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        http: reqwest::Client,
        env: Environment,
        auth_base_url: &str,
        credentials: Option<Credentials>,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            http,
            env,
            token_url: token_url(auth_base_url),
            credentials,
            cache,
            refresh: Mutex::new(()),
        }
    }

    /// Builds a manager for the configured environment.
    ///
    /// Missing credentials are not an error here: a cached token can still be
    /// served. They are reported when a grant is actually needed.
    pub fn from_config(config: &Config, http: reqwest::Client, cache: Arc<dyn TokenCache>) -> Self {
        Self::new(
            http,
            config.environment,
            &config.auth_base_url(),
            config.credentials().ok().cloned(),
            cache,
        )
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.env
    }

    /// Returns a usable bearer token, fetching one if needed.
    ///
    /// With `force_refresh` the cache is bypassed and a grant is always made.
    ///
    /// # Errors
    ///
    /// - [`EtimsError::Config`] if a grant is needed and no credentials are configured.
    /// - [`EtimsError::Auth`] if the grant fails or its response cannot be decoded.
    pub async fn token(&self, force_refresh: bool) -> Result<String> {
        if !force_refresh && let Some(tok) = self.valid_cached().await {
            tracing::debug!(env = %self.env, "token cache hit");
            return Ok(tok.access_token);
        }

        let _guard = self.refresh.lock().await;
        if !force_refresh && let Some(tok) = self.valid_cached().await {
            return Ok(tok.access_token);
        }
        self.fetch_and_store().await
    }

    /// Drops the cached token. Never fails; cache errors are logged.
    pub async fn forget(&self) {
        if let Err(e) = self.cache.clear(self.env).await {
            tracing::warn!(env = %self.env, error = %e, "failed to clear token cache");
        }
    }

    /// Replaces a token the upstream rejected and returns its successor.
    ///
    /// Equivalent to [`forget`](Self::forget) followed by a forced
    /// [`token`](Self::token), performed as one critical section. When another
    /// task already replaced `stale` while this one waited, that replacement is
    /// returned without a second grant.
    ///
    /// # Errors
    ///
    /// Same as [`token`](Self::token).
    pub async fn renew(&self, stale: &str) -> Result<String> {
        let _guard = self.refresh.lock().await;
        if let Some(tok) = self.valid_cached().await
            && tok.access_token != stale
        {
            tracing::debug!(env = %self.env, "token already renewed by another caller");
            return Ok(tok.access_token);
        }
        self.forget().await;
        self.fetch_and_store().await
    }

    /// The cached token record, expired or not.
    pub async fn cached(&self) -> Option<CachedToken> {
        self.cache.load(self.env).await
    }

    async fn valid_cached(&self) -> Option<CachedToken> {
        self.cache.load(self.env).await.filter(|t| !t.is_expired())
    }

    async fn fetch_and_store(&self) -> Result<String> {
        let token = self.fetch().await?;
        if let Err(e) = self.cache.store(self.env, &token).await {
            tracing::warn!(env = %self.env, error = %e, "failed to persist token");
        }
        Ok(token.access_token)
    }

    async fn fetch(&self) -> Result<CachedToken> {
        let creds = self.credentials.as_ref().ok_or_else(|| {
            EtimsError::Config(format!("no consumer credentials configured for {}", self.env))
        })?;

        let resp = self
            .http
            .get(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                basic_authorization(&creds.consumer_key, &creds.consumer_secret),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| EtimsError::Auth(format!("token request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| EtimsError::Auth(format!("token request failed: {e}")))?;

        let json: serde_json::Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(EtimsError::Auth(format!(
                    "token endpoint returned {status}"
                )));
            }
            Err(e) => {
                return Err(EtimsError::Auth(format!(
                    "could not decode token response: {e}"
                )));
            }
        };

        let token = parse_token_response(&json).map_err(|e| match e {
            EtimsError::Auth(msg) if !status.is_success() => {
                EtimsError::Auth(format!("{msg} (HTTP {})", status.as_u16()))
            }
            other => other,
        })?;

        tracing::info!(
            env = %self.env,
            valid_for_secs = token.remaining_secs(),
            "obtained new access token"
        );
        Ok(token)
    }
}
