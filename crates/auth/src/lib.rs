//! Bearer token acquisition for the eTIMS OSCU API.
//!
//! [`client_credentials`] builds the OAuth client-credentials request and
//! parses its response. The [`TokenManager`] owns the token lifecycle:
//! cache lookup, expiry detection, serialized refresh and forced renewal.

pub mod client_credentials;
pub mod manager;

pub use manager::TokenManager;
