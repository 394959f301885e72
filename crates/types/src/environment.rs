//! Upstream environment identifiers and their well-known hosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which eTIMS deployment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = crate::EtimsError;

    /// Parse an environment name or well-known alias.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`](crate::EtimsError::Config) for any other string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" | "sbx" => Ok(Self::Sandbox),
            "production" | "prod" => Ok(Self::Production),
            other => Err(crate::EtimsError::Config(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

impl Environment {
    /// Base URL of the OSCU business API.
    #[must_use]
    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://etims-api-sbx.kra.go.ke/etims-api",
            Self::Production => "https://etims-api.kra.go.ke/etims-api",
        }
    }

    /// Base URL of the authorization API (`/token/generate` lives under it).
    #[must_use]
    pub fn auth_base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sbx.kra.go.ke/v1",
            Self::Production => "https://api.kra.go.ke/v1",
        }
    }

    /// Returns all known environments.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Sandbox, Self::Production]
    }
}
