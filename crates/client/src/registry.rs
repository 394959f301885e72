//! Logical endpoint names → upstream paths.

use crate::operation::Operation;
use etims_types::{EtimsError, Result};
use std::collections::HashMap;

/// Which header set an endpoint receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Device initialization: authorization headers only.
    Initialization,
    /// Every other operation: authorization plus business identity headers.
    Business,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    /// Path relative to the API base URL, with a leading `/`.
    pub path: String,
    pub kind: EndpointKind,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: EndpointKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }
}

/// Lookup table from logical names to endpoints.
///
/// Keys are always logical names; passing a path is rejected so callers
/// cannot bypass the table.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    entries: HashMap<String, Endpoint>,
}

impl EndpointRegistry {
    #[must_use]
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        Self {
            entries: endpoints
                .into_iter()
                .map(|e| (e.name.clone(), e))
                .collect(),
        }
    }

    /// The OSCU table: one endpoint per [`Operation`], path `/{name}`.
    #[must_use]
    pub fn oscu() -> Self {
        Self::new(Operation::all().iter().map(|op| {
            let kind = if *op == Operation::SelectInitOsdcInfo {
                EndpointKind::Initialization
            } else {
                EndpointKind::Business
            };
            Endpoint::new(op.name(), format!("/{}", op.name()), kind)
        }))
    }

    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] if `name` looks like a path or is not registered.
    pub fn resolve(&self, name: &str) -> Result<&Endpoint> {
        if name.starts_with('/') {
            return Err(EtimsError::Config(format!(
                "endpoint key expected, path given [{name}]"
            )));
        }
        self.entries
            .get(name)
            .ok_or_else(|| EtimsError::Config(format!("endpoint [{name}] not configured")))
    }

    /// Registered endpoints, sorted by name.
    #[must_use]
    pub fn endpoints(&self) -> Vec<&Endpoint> {
        let mut all: Vec<_> = self.entries.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
