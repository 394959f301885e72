//! Core types and traits for the etims workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! eTIMS client, including the error taxonomy, environment identifiers, the
//! cached bearer token, classified responses, typed business payloads and the
//! async token-cache trait that the storage layer implements.

pub mod environment;
pub mod error;
pub mod payload;
pub mod response;
pub mod token;
pub mod traits;

pub use environment::Environment;
pub use error::{ApiErrorClass, EtimsError, Result, ValidationErrors};
pub use response::{EtimsResponse, Outcome};
pub use token::{CachedToken, unix_now};
pub use traits::TokenCache;
