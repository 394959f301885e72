use etims_types::{Environment, EtimsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

/// OAuth client credentials issued by the upstream developer portal.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Identity of the taxpayer branch and device the client speaks for.
///
/// `tin`, `bhf_id` and `cmc_key` are sent as headers on every business call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessIdentity {
    #[serde(default)]
    pub tin: String,
    #[serde(default)]
    pub bhf_id: String,
    #[serde(default)]
    pub device_serial: String,
    /// Machine key returned by device initialization.
    #[serde(default)]
    pub cmc_key: String,
}

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream deployment (defaults to sandbox).
    #[serde(default)]
    pub environment: Environment,
    /// Consumer key/secret per environment.
    #[serde(default)]
    pub credentials: HashMap<Environment, Credentials>,
    /// Per-attempt HTTP timeout (defaults to 30 s).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub business: BusinessIdentity,
    /// Directory for the file token cache (defaults to the OS temp dir).
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Overrides the environment's business API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Overrides the environment's authorization base URL.
    #[serde(default)]
    pub auth_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            credentials: HashMap::new(),
            timeout_secs: default_timeout_secs(),
            business: BusinessIdentity::default(),
            cache_dir: None,
            api_base_url: None,
            auth_base_url: None,
        }
    }
}

impl Config {
    /// Credentials for the configured environment.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] if none are configured or either half is empty.
    pub fn credentials(&self) -> Result<&Credentials> {
        match self.credentials.get(&self.environment) {
            Some(c) if !c.consumer_key.is_empty() && !c.consumer_secret.is_empty() => Ok(c),
            _ => Err(EtimsError::Config(format!(
                "no consumer credentials configured for {}",
                self.environment
            ))),
        }
    }

    /// Business API base URL, without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.api_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Authorization API base URL, without a trailing slash.
    #[must_use]
    pub fn auth_base_url(&self) -> String {
        self.auth_base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.auth_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory holding the file token cache.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
