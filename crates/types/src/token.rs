//! Bearer token record and expiry logic.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds subtracted from the upstream-reported lifetime when computing expiry.
pub const EXPIRY_BUFFER_SECS: u64 = 60;

/// Lifetime assumed when the authorization response omits `expires_in`.
pub const DEFAULT_LIFETIME_SECS: u64 = 3600;

/// A bearer token as persisted in a token cache.
///
/// The serde shape is the cache record: `{"access_token": .., "expires_at": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub access_token: String,
    /// Unix timestamp (seconds) after which the token must not be used.
    pub expires_at: u64,
}

impl CachedToken {
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_at: u64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Build a token from an upstream-reported lifetime, applying the safety buffer.
    #[must_use]
    pub fn from_lifetime(access_token: impl Into<String>, expires_in_secs: u64) -> Self {
        let expires_at = unix_now()
            .saturating_add(expires_in_secs)
            .saturating_sub(EXPIRY_BUFFER_SECS);
        Self::new(access_token, expires_at)
    }

    /// Return `true` once `now >= expires_at`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    #[must_use]
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Seconds left before expiry, zero when already expired.
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        self.expires_at.saturating_sub(unix_now())
    }
}

/// Current wall-clock time as unix seconds.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_expiry_is_valid() {
        let t = CachedToken::new("tok", unix_now() + 600);
        assert!(!t.is_expired());
        assert!(t.remaining_secs() > 590);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let t = CachedToken::new("tok", unix_now() - 1);
        assert!(t.is_expired());
        assert_eq!(t.remaining_secs(), 0);
    }

    #[test]
    fn test_expiry_boundary() {
        let t = CachedToken::new("tok", 1_000);
        assert!(!t.is_expired_at(999));
        assert!(t.is_expired_at(1_000));
    }

    #[test]
    fn test_from_lifetime_applies_buffer() {
        let before = unix_now();
        let t = CachedToken::from_lifetime("abc", 3600);
        let after = unix_now();
        assert!(t.expires_at >= before + 3540);
        assert!(t.expires_at <= after + 3540);
    }

    #[test]
    fn test_from_short_lifetime_is_already_expired() {
        let t = CachedToken::from_lifetime("abc", 30);
        assert!(t.is_expired());
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let t = CachedToken::from_lifetime("abc", u64::MAX);
        assert_eq!(t.expires_at, u64::MAX - EXPIRY_BUFFER_SECS);
        assert!(!t.is_expired());
    }

    #[test]
    fn test_cache_record_shape() {
        let t = CachedToken::new("abc", 1_700_000_000);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"access_token": "abc", "expires_at": 1_700_000_000_u64})
        );
    }
}
