//! Unified error type for the etims workspace.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Enumerates all error kinds a caller of the eTIMS client can observe.
#[derive(Debug, Error)]
pub enum EtimsError {
    /// One or more payload fields violated their rules. The payload was never sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Missing credentials, unknown operation or schema, or a raw path passed
    /// where a logical endpoint name was expected.
    #[error("configuration error: {0}")]
    Config(String),

    /// A token could not be obtained, or the upstream rejected it after the retry.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Connection, timeout or TLS failure. Never retried.
    #[error("transport error: {0}")]
    Transport(String),

    /// The token cache could not be written or cleared.
    #[error("token cache error: {0}")]
    Storage(String),

    /// The upstream answered with a failing HTTP status or a non-success result code.
    #[error("{class} error ({}): {message}", .result_code.as_deref().unwrap_or("-"))]
    Api {
        class: ApiErrorClass,
        status: u16,
        result_code: Option<String>,
        message: String,
        body: Option<Value>,
    },

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for EtimsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<ValidationErrors> for EtimsError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl EtimsError {
    /// Upstream business result code carried by an [`EtimsError::Api`], if any.
    #[must_use]
    pub fn result_code(&self) -> Option<&str> {
        match self {
            Self::Api { result_code, .. } => result_code.as_deref(),
            _ => None,
        }
    }

    /// Classification of an [`EtimsError::Api`].
    #[must_use]
    pub fn api_class(&self) -> Option<ApiErrorClass> {
        match self {
            Self::Api { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// HTTP-ish status associated with the error, if it came from the upstream.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the error was raised before any network attempt.
    #[must_use]
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

/// Which side of the exchange an [`EtimsError::Api`] is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorClass {
    /// Non-2xx HTTP status (fault envelope or raw body).
    Http,
    /// Result codes `"891"` through `"899"`.
    Client,
    /// Result codes `"900"` and above.
    Server,
    /// Any other non-success result code.
    Business,
}

impl fmt::Display for ApiErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Client => write!(f, "client"),
            Self::Server => write!(f, "server"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// Field-path → message map collected across a whole payload.
///
/// Paths use dots for nested objects and brackets for list elements,
/// e.g. `receipt.custTin` or `itemList[2].qty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. A field keeps its first message.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(path.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// Iterates violations ordered by field path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) rejected", self.fields.len())?;
        for (i, (path, msg)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{path} {msg}")?;
        }
        Ok(())
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EtimsError>;
