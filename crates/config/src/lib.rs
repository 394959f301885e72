//! Configuration loading for the etims client.
//!
//! Uses figment to layer YAML or JSON files and `ETIMS_`-prefixed
//! environment variables over sensible defaults.

pub mod loader;
pub mod schema;

pub use schema::{BusinessIdentity, Config, Credentials};
