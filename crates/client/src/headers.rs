//! Per-endpoint business headers.

use crate::registry::{Endpoint, EndpointKind};
use etims_config::BusinessIdentity;

/// Decides the extra headers an endpoint receives on top of
/// `Authorization`, `Content-Type` and `Accept`, which are always sent.
pub trait HeaderPolicy: Send + Sync {
    fn headers(&self, endpoint: &Endpoint) -> Vec<(&'static str, String)>;
}

/// Sends `tin`, `bhfId` and `cmcKey` to every business endpoint and nothing
/// extra to device initialization.
#[derive(Debug, Clone, Default)]
pub struct BusinessHeaders {
    pub tin: String,
    pub bhf_id: String,
    pub cmc_key: String,
}

impl BusinessHeaders {
    pub fn new(tin: impl Into<String>, bhf_id: impl Into<String>, cmc_key: impl Into<String>) -> Self {
        Self {
            tin: tin.into(),
            bhf_id: bhf_id.into(),
            cmc_key: cmc_key.into(),
        }
    }
}

impl From<&BusinessIdentity> for BusinessHeaders {
    fn from(id: &BusinessIdentity) -> Self {
        Self::new(&id.tin, &id.bhf_id, &id.cmc_key)
    }
}

impl HeaderPolicy for BusinessHeaders {
    fn headers(&self, endpoint: &Endpoint) -> Vec<(&'static str, String)> {
        match endpoint.kind {
            EndpointKind::Initialization => Vec::new(),
            EndpointKind::Business => vec![
                ("tin", self.tin.clone()),
                ("bhfId", self.bhf_id.clone()),
                ("cmcKey", self.cmc_key.clone()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EndpointRegistry;

    #[test]
    fn test_initialization_gets_no_business_headers() {
        let r = EndpointRegistry::oscu();
        let h = BusinessHeaders::new("P051234567A", "00", "CMC");
        assert!(h.headers(r.resolve("selectInitOsdcInfo").unwrap()).is_empty());
    }

    #[test]
    fn test_business_endpoint_headers() {
        let r = EndpointRegistry::oscu();
        let h = BusinessHeaders::new("P051234567A", "00", "CMC");
        let got = h.headers(r.resolve("saveItem").unwrap());
        assert_eq!(
            got,
            vec![
                ("tin", "P051234567A".to_string()),
                ("bhfId", "00".to_string()),
                ("cmcKey", "CMC".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_identity() {
        let id = BusinessIdentity {
            tin: "A1".into(),
            bhf_id: "01".into(),
            device_serial: "dvc".into(),
            cmc_key: "K".into(),
        };
        let h = BusinessHeaders::from(&id);
        assert_eq!(h.bhf_id, "01");
        assert_eq!(h.cmc_key, "K");
    }
}
