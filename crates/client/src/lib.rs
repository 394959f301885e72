//! Request lifecycle for the eTIMS OSCU API.
//!
//! - [`EndpointRegistry`] maps logical operation names to upstream paths.
//! - [`HeaderPolicy`] decides which business headers an endpoint receives.
//! - [`RequestDispatcher`] sends one request per attempt and re-authenticates
//!   exactly once when the upstream reports an expired token.
//! - [`classify`] turns each response into an [`EtimsResponse`] or a typed error.
//! - [`EtimsClient`] ties validation and dispatch into named operations.
//!
//! [`EtimsResponse`]: etims_types::EtimsResponse

pub mod classify;
pub mod client;
pub mod dispatcher;
pub mod headers;
pub mod operation;
pub mod registry;

pub use classify::ResponseEnvelope;
pub use client::EtimsClient;
pub use dispatcher::RequestDispatcher;
pub use headers::{BusinessHeaders, HeaderPolicy};
pub use operation::Operation;
pub use registry::{Endpoint, EndpointKind, EndpointRegistry};
