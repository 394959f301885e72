//! Response classification.
//!
//! Decision order, first match wins:
//! 1. HTTP 401 → [`EtimsError::Auth`].
//! 2. Other non-2xx → [`ApiErrorClass::Http`] with the fault string or raw body.
//! 3. No `resultCd` → success, [`Outcome::Unreported`].
//! 4. `"000"` / `"001"` → success.
//! 5. `"891"..="899"` → [`ApiErrorClass::Client`] (400).
//! 6. `>= "900"` → [`ApiErrorClass::Server`] (500).
//! 7. Anything else → [`ApiErrorClass::Business`] (400).
//!
//! Result codes are compared as strings, never as numbers.

use etims_types::{ApiErrorClass, EtimsError, EtimsResponse, Outcome, Result};
use serde_json::Value;

/// One HTTP exchange as seen by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub raw_body: String,
    /// `None` when the body is not valid JSON.
    pub parsed: Option<Value>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(status: u16, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        let parsed = serde_json::from_str(&raw_body).ok();
        Self {
            status,
            raw_body,
            parsed,
        }
    }

    /// `fault.faultstring` from a gateway fault envelope.
    #[must_use]
    pub fn fault_string(&self) -> Option<&str> {
        self.parsed
            .as_ref()?
            .pointer("/fault/faultstring")
            .and_then(Value::as_str)
    }

    /// Business result code, stringified if the upstream sent a number.
    #[must_use]
    pub fn result_code(&self) -> Option<String> {
        match self.parsed.as_ref()?.get("resultCd")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn result_msg(&self) -> Option<&str> {
        self.parsed.as_ref()?.get("resultMsg").and_then(Value::as_str)
    }

    /// `true` when the upstream rejected the bearer token itself.
    #[must_use]
    pub fn is_token_expired(&self) -> bool {
        if self.status == 401 {
            return true;
        }
        self.fault_string().is_some_and(|f| {
            let f = f.to_lowercase();
            f.contains("access token expired") || f.contains("invalid token")
        })
    }

    /// Classifies the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Auth`] for 401 and [`EtimsError::Api`] for every
    /// failing status or result code; see the module docs for the order.
    pub fn classify(self) -> Result<EtimsResponse> {
        if self.status == 401 {
            return Err(EtimsError::Auth(
                "unauthorized: invalid or expired token".into(),
            ));
        }

        if !(200..300).contains(&self.status) {
            let message = self
                .fault_string()
                .map_or_else(|| self.raw_body.trim(), str::trim)
                .to_string();
            let message = if message.is_empty() {
                "HTTP error".to_string()
            } else {
                message
            };
            return Err(EtimsError::Api {
                class: ApiErrorClass::Http,
                status: self.status,
                result_code: None,
                message,
                body: self.parsed,
            });
        }

        let Some(code) = self.result_code() else {
            return Ok(EtimsResponse::new(
                Outcome::Unreported,
                self.parsed.unwrap_or(Value::Null),
            ));
        };

        if let Some(outcome) = Outcome::from_code(&code) {
            return Ok(EtimsResponse::new(outcome, self.parsed.unwrap_or(Value::Null)));
        }

        let (class, status) = classify_code(&code);
        let message = self
            .result_msg()
            .unwrap_or("Unknown API response")
            .to_string();
        Err(EtimsError::Api {
            class,
            status,
            result_code: Some(code),
            message,
            body: self.parsed,
        })
    }
}

/// Maps a non-success result code to its class and HTTP-ish status.
#[must_use]
pub fn classify_code(code: &str) -> (ApiErrorClass, u16) {
    if ("891"..="899").contains(&code) {
        (ApiErrorClass::Client, 400)
    } else if code >= "900" {
        (ApiErrorClass::Server, 500)
    } else {
        (ApiErrorClass::Business, 400)
    }
}
