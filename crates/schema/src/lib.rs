//! Pre-flight validation of outbound eTIMS payloads.
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s, each a chain of
//! [`Check`]s. The [`Validator`] walks a JSON payload against a named schema
//! and reports every violated field at once, keyed by its path
//! (`receipt.custTin`, `itemList[2].qty`).

pub mod name;
pub mod rule;
pub mod schemas;
pub mod validator;

pub use name::SchemaName;
pub use rule::{Check, FieldRule, Schema};
pub use validator::Validator;
