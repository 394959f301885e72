//! figment-backed loaders for [`Config`].
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! `ETIMS_*` environment variables. Nested keys use `__` as separator, e.g.
//! `ETIMS_CREDENTIALS__SANDBOX__CONSUMER_KEY` or `ETIMS_BUSINESS__TIN`.

use crate::schema::Config;
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Yaml},
};
use std::path::Path;

const ENV_PREFIX: &str = "ETIMS_";

fn env() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        Self::figment(Some(path)).extract()
    }

    /// Loads configuration from an optional file plus `ETIMS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed or a value has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).merge(env()).extract()
    }

    fn figment(path: Option<&Path>) -> Figment {
        let base = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(p) if p.extension().is_some_and(|e| e == "json") => base.merge(Json::file(p)),
            Some(p) => base.merge(Yaml::file(p)),
            None => base,
        }
    }
}
