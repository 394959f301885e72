//! Sends requests to the business API.
//!
//! Each call makes one attempt. If the upstream reports the bearer token as
//! expired, the token is renewed and the request is sent exactly once more;
//! whatever the second attempt returns is classified and surfaced.
use crate::classify::ResponseEnvelope;
use crate::headers::HeaderPolicy;
use crate::registry::{Endpoint, EndpointRegistry};
use etims_auth::TokenManager;
use etims_types::{EtimsResponse, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;

pub struct RequestDispatcher {
    http: Client,
    base_url: String,
    registry: EndpointRegistry,
    headers: Arc<dyn HeaderPolicy>,
    auth: Arc<TokenManager>,
}

impl RequestDispatcher {
    pub fn new(
        http: Client,
        base_url: &str,
        registry: EndpointRegistry,
        headers: Arc<dyn HeaderPolicy>,
        auth: Arc<TokenManager>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            registry,
            headers,
            auth,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    #[must_use]
    pub fn auth(&self) -> &TokenManager {
        &self.auth
    }

    /// Sends `payload` to the endpoint registered as `name`.
    ///
    /// `GET` sends the payload's top-level fields as query parameters; every
    /// other method sends it as a JSON body.
    ///
    /// # Errors
    ///
    /// - [`EtimsError::Config`] for an unknown name or a raw path.
    /// - [`EtimsError::Transport`] for connection, timeout or TLS failures (not retried).
    /// - [`EtimsError::Auth`] if no token can be obtained or the retry is still rejected.
    /// - [`EtimsError::Api`] for failing statuses and result codes.
    ///
    /// [`EtimsError::Config`]: etims_types::EtimsError::Config
    /// [`EtimsError::Transport`]: etims_types::EtimsError::Transport
    /// [`EtimsError::Auth`]: etims_types::EtimsError::Auth
    /// [`EtimsError::Api`]: etims_types::EtimsError::Api
    pub async fn send(&self, method: Method, name: &str, payload: &Value) -> Result<EtimsResponse> {
        let endpoint = self.registry.resolve(name)?;
        let token = self.auth.token(false).await?;
        let first = self.attempt(&method, endpoint, payload, &token).await?;

        let last = if first.is_token_expired() {
            tracing::warn!(
                endpoint = %endpoint.name,
                status = first.status,
                "access token rejected, renewing and retrying once"
            );
            let renewed = self.auth.renew(&token).await?;
            self.attempt(&method, endpoint, payload, &renewed).await?
        } else {
            first
        };

        last.classify()
    }

    async fn attempt(
        &self,
        method: &Method,
        endpoint: &Endpoint,
        payload: &Value,
        token: &str,
    ) -> Result<ResponseEnvelope> {
        let url = format!("{}{}", self.base_url, endpoint.path);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        for (name, value) in self.headers.headers(endpoint) {
            req = req.header(name, value);
        }
        req = if *method == Method::GET {
            req.query(&query_pairs(payload))
        } else {
            req.body(serde_json::to_vec(payload)?)
        };

        tracing::debug!(method = %method, endpoint = %endpoint.name, "dispatching request");
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        tracing::debug!(endpoint = %endpoint.name, status, "received response");
        Ok(ResponseEnvelope::new(status, body))
    }
}

/// Flattens a payload's top-level fields into query parameters.
///
/// Strings are sent verbatim, `null` fields are dropped and every other value
/// is sent as its JSON text.
fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Some(obj) = payload.as_object() else {
        return Vec::new();
    };
    obj.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::BusinessHeaders;
    use etims_config::Credentials;
    use etims_store::InMemoryTokenCache;
    use etims_types::{CachedToken, Environment, EtimsError, Outcome, unix_now};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher(server: &MockServer, cached: &str) -> RequestDispatcher {
        let cache = Arc::new(InMemoryTokenCache::with_token(
            Environment::Sandbox,
            CachedToken::new(cached, unix_now() + 600),
        ));
        let auth = Arc::new(TokenManager::new(
            Client::new(),
            Environment::Sandbox,
            &server.uri(),
            Some(Credentials::new("key", "secret")),
            cache,
        ));
        RequestDispatcher::new(
            Client::new(),
            &format!("{}/etims-api/", server.uri()),
            EndpointRegistry::oscu(),
            Arc::new(BusinessHeaders::new("P051234567A", "00", "CMC-KEY")),
            auth,
        )
    }

    async fn mount_grant(server: &MockServer, token: &str, expect: u64) {
        Mock::given(method("GET"))
            .and(path("/token/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": token, "expires_in": 3600})),
            )
            .expect(expect)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_success_sends_json_body_and_headers() {
        let server = MockServer::start().await;
        mount_grant(&server, "unused", 0).await;
        Mock::given(method("POST"))
            .and(path("/etims-api/selectCodeList"))
            .and(header("authorization", "Bearer cached-token"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(header("tin", "P051234567A"))
            .and(header("bhfId", "00"))
            .and(header("cmcKey", "CMC-KEY"))
            .and(body_json(json!({"lastReqDt": "20240101000000"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "000",
                "resultMsg": "Successful",
                "data": {"clsList": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "cached-token");
        let resp = d
            .send(Method::POST, "selectCodeList", &json!({"lastReqDt": "20240101000000"}))
            .await
            .unwrap();
        assert_eq!(resp.outcome, Outcome::Accepted);
        assert_eq!(resp.data(), Some(&json!({"clsList": []})));
    }

    #[tokio::test]
    async fn test_initialization_omits_business_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/etims-api/selectInitOsdcInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "000",
                "data": {"info": {"cmcKey": "NEW-KEY"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/etims-api/selectNoticeList"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "000"})))
            .mount(&server)
            .await;

        let d = dispatcher(&server, "tok");
        let init = d
            .send(
                Method::POST,
                "selectInitOsdcInfo",
                &json!({"tin": "P051234567A", "bhfId": "00", "dvcSrlNo": "dvc"}),
            )
            .await
            .unwrap();
        assert_eq!(init.cmc_key(), Some("NEW-KEY"));
        d.send(Method::POST, "selectNoticeList", &json!({"lastReqDt": "20240101000000"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let init_req = &requests[0];
        assert!(init_req.headers.get("authorization").is_some());
        assert!(init_req.headers.get("tin").is_none());
        assert!(init_req.headers.get("bhfId").is_none());
        assert!(init_req.headers.get("cmcKey").is_none());
        let notice_req = &requests[1];
        assert_eq!(notice_req.headers.get("tin").unwrap(), "P051234567A");
        assert_eq!(notice_req.headers.get("cmcKey").unwrap(), "CMC-KEY");
    }

    #[tokio::test]
    async fn test_expired_token_retried_exactly_once() {
        let server = MockServer::start().await;
        mount_grant(&server, "fresh-token", 1).await;
        Mock::given(method("POST"))
            .and(path("/etims-api/saveItem"))
            .and(header("authorization", "Bearer stale-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/etims-api/saveItem"))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "000"})))
            .expect(1)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "stale-token");
        let resp = d.send(Method::POST, "saveItem", &json!({})).await.unwrap();
        assert_eq!(resp.outcome, Outcome::Accepted);
        assert_eq!(
            d.auth().cached().await.unwrap().access_token,
            "fresh-token"
        );
    }

    #[tokio::test]
    async fn test_second_rejection_is_not_retried() {
        let server = MockServer::start().await;
        mount_grant(&server, "fresh-token", 1).await;
        Mock::given(method("POST"))
            .and(path("/etims-api/saveItem"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "stale-token");
        let err = d.send(Method::POST, "saveItem", &json!({})).await.unwrap_err();
        assert!(matches!(err, EtimsError::Auth(_)));
    }

    #[tokio::test]
    async fn test_fault_string_triggers_retry() {
        let server = MockServer::start().await;
        mount_grant(&server, "fresh-token", 1).await;
        Mock::given(method("POST"))
            .and(path("/etims-api/selectItemList"))
            .and(header("authorization", "Bearer stale-token"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "fault": {"faultstring": "Invalid Access Token Expired"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/etims-api/selectItemList"))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "001",
                "resultMsg": "There is no search result"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "stale-token");
        let resp = d
            .send(Method::POST, "selectItemList", &json!({"lastReqDt": "20240101000000"}))
            .await
            .unwrap();
        assert_eq!(resp.outcome, Outcome::AcceptedWithWarning);
    }

    #[tokio::test]
    async fn test_business_error_not_retried() {
        let server = MockServer::start().await;
        mount_grant(&server, "unused", 0).await;
        Mock::given(method("POST"))
            .and(path("/etims-api/saveItem"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "894",
                "resultMsg": "Unable to connect to the server"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "tok");
        let err = d.send(Method::POST, "saveItem", &json!({})).await.unwrap_err();
        assert_eq!(err.result_code(), Some("894"));
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_get_sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/etims-api/selectCodeList"))
            .and(query_param("lastReqDt", "20240101000000"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "000"})))
            .expect(1)
            .mount(&server)
            .await;

        let d = dispatcher(&server, "tok");
        d.send(
            Method::GET,
            "selectCodeList",
            &json!({"lastReqDt": "20240101000000", "page": 2, "skip": null}),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_path_key_rejected_before_network() {
        let server = MockServer::start().await;
        let d = dispatcher(&server, "tok");
        let err = d.send(Method::POST, "/saveItem", &json!({})).await.unwrap_err();
        assert!(matches!(err, EtimsError::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_not_retried() {
        let auth = Arc::new(TokenManager::new(
            Client::new(),
            Environment::Sandbox,
            "http://127.0.0.1:1",
            None,
            Arc::new(InMemoryTokenCache::with_token(
                Environment::Sandbox,
                CachedToken::new("tok", unix_now() + 600),
            )),
        ));
        let d = RequestDispatcher::new(
            Client::new(),
            "http://127.0.0.1:1/etims-api",
            EndpointRegistry::oscu(),
            Arc::new(BusinessHeaders::default()),
            auth,
        );
        let err = d.send(Method::POST, "saveItem", &json!({})).await.unwrap_err();
        assert!(matches!(err, EtimsError::Transport(_)));
    }

    #[test]
    fn test_query_pairs() {
        let pairs = query_pairs(&json!({"a": "x/y", "b": 1.5, "c": null, "d": true}));
        assert!(pairs.contains(&("a".to_string(), "x/y".to_string())));
        assert!(pairs.contains(&("b".to_string(), "1.5".to_string())));
        assert!(pairs.contains(&("d".to_string(), "true".to_string())));
        assert_eq!(pairs.len(), 3);
    }
}
