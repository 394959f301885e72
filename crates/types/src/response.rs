//! Successful upstream responses.

use serde::Serialize;
use serde_json::Value;

/// Result code for full success.
pub const RESULT_OK: &str = "000";
/// Result code for "accepted with warning".
pub const RESULT_OK_WITH_WARNING: &str = "001";

/// How the upstream acknowledged a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Result code `"000"`.
    Accepted,
    /// Result code `"001"`: accepted, but the upstream attached a notice.
    AcceptedWithWarning,
    /// The response carried no result code at all.
    Unreported,
}

impl Outcome {
    /// Maps a success result code to its outcome; `None` for every other code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            RESULT_OK => Some(Self::Accepted),
            RESULT_OK_WITH_WARNING => Some(Self::AcceptedWithWarning),
            _ => None,
        }
    }
}

/// A classified successful response: the parsed body plus its envelope fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtimsResponse {
    pub outcome: Outcome,
    pub result_code: Option<String>,
    pub result_msg: Option<String>,
    /// `yyyyMMddHHmmss` timestamp stamped by the upstream.
    pub result_dt: Option<String>,
    /// The full parsed body, unchanged.
    pub body: Value,
}

impl EtimsResponse {
    /// Build a response from a parsed body whose result code has already been accepted.
    #[must_use]
    pub fn new(outcome: Outcome, body: Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            outcome,
            result_code: field("resultCd"),
            result_msg: field("resultMsg"),
            result_dt: field("resultDt"),
            body,
        }
    }

    /// The operation-specific `data` object, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data").filter(|v| !v.is_null())
    }

    /// `true` when the upstream flagged the call with result code `"001"`.
    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.outcome == Outcome::AcceptedWithWarning
    }

    /// Machine key issued by the initialization operation.
    ///
    /// Looks in `data.info.cmcKey` first, then at the top level.
    #[must_use]
    pub fn cmc_key(&self) -> Option<&str> {
        self.body
            .pointer("/data/info/cmcKey")
            .or_else(|| self.body.get("cmcKey"))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_from_code() {
        assert_eq!(Outcome::from_code("000"), Some(Outcome::Accepted));
        assert_eq!(Outcome::from_code("001"), Some(Outcome::AcceptedWithWarning));
        assert_eq!(Outcome::from_code("0"), None);
        assert_eq!(Outcome::from_code("891"), None);
    }

    #[test]
    fn test_envelope_fields_extracted() {
        let body = json!({
            "resultCd": "001",
            "resultMsg": "It is succeeded with warning",
            "resultDt": "20240101120000",
            "data": {"itemList": []}
        });
        let resp = EtimsResponse::new(Outcome::AcceptedWithWarning, body.clone());
        assert_eq!(resp.result_code.as_deref(), Some("001"));
        assert_eq!(resp.result_dt.as_deref(), Some("20240101120000"));
        assert!(resp.has_warning());
        assert_eq!(resp.data(), Some(&json!({"itemList": []})));
        assert_eq!(resp.into_body(), body);
    }

    #[test]
    fn test_null_data_is_absent() {
        let resp = EtimsResponse::new(Outcome::Accepted, json!({"resultCd": "000", "data": null}));
        assert!(resp.data().is_none());
    }

    #[test]
    fn test_cmc_key_nested_and_top_level() {
        let nested = EtimsResponse::new(
            Outcome::Accepted,
            json!({"resultCd": "000", "data": {"info": {"cmcKey": "ABC123"}}}),
        );
        assert_eq!(nested.cmc_key(), Some("ABC123"));

        let flat = EtimsResponse::new(Outcome::Unreported, json!({"cmcKey": "XYZ"}));
        assert_eq!(flat.cmc_key(), Some("XYZ"));

        let none = EtimsResponse::new(Outcome::Accepted, json!({"resultCd": "000"}));
        assert!(none.cmc_key().is_none());
    }
}
