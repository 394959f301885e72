//! OAuth 2.0 client-credentials grant against the upstream authorization API.
//!
//! The grant is a `GET` with the consumer key/secret as HTTP Basic credentials;
//! there is no refresh token, so renewal simply repeats the grant.
use base64::{Engine as _, engine::general_purpose::STANDARD};
use etims_types::{CachedToken, EtimsError, token::DEFAULT_LIFETIME_SECS, traits::Result};
use serde_json::Value;

pub const TOKEN_PATH: &str = "/token/generate";
pub const GRANT_TYPE: &str = "client_credentials";

/// Full token URL under `auth_base` (trailing slash tolerated).
#[must_use]
pub fn token_url(auth_base: &str) -> String {
    format!(
        "{}{TOKEN_PATH}?grant_type={GRANT_TYPE}",
        auth_base.trim_end_matches('/')
    )
}

/// `Authorization` header value for the consumer key/secret pair.
#[must_use]
pub fn basic_authorization(consumer_key: &str, consumer_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{consumer_key}:{consumer_secret}"))
    )
}

/// Turns a decoded token response into a cacheable token.
///
/// `expires_in` may arrive as a number or a numeric string; when absent the
/// token is assumed to live for [`DEFAULT_LIFETIME_SECS`].
///
/// # Errors
///
/// Returns [`EtimsError::Auth`] if the body is not an object, carries an
/// upstream `errorCode`, or lacks `access_token`.
pub fn parse_token_response(json: &Value) -> Result<CachedToken> {
    let Some(obj) = json.as_object() else {
        return Err(EtimsError::Auth(
            "could not decode token response: expected a JSON object".into(),
        ));
    };

    if let Some(code) = obj.get("errorCode").filter(|v| !v.is_null()) {
        let message = obj
            .get("errorMessage")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(EtimsError::Auth(format!(
            "token request rejected ({}): {message}",
            display_code(code)
        )));
    }

    let access_token = obj
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EtimsError::Auth("missing access_token".into()))?;

    let expires_in = obj
        .get("expires_in")
        .and_then(lifetime_secs)
        .unwrap_or(DEFAULT_LIFETIME_SECS);

    Ok(CachedToken::from_lifetime(access_token, expires_in))
}

/// Reads `expires_in` as whole seconds. Fractions are truncated and negative
/// lifetimes clamp to zero; `None` only when the value is not numeric at all.
fn lifetime_secs(v: &Value) -> Option<u64> {
    if let Some(exact) = v.as_u64() {
        return Some(exact);
    }
    let secs = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if secs.is_nan() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = secs.max(0.0) as u64;
    Some(whole)
}

fn display_code(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
