//! Shared types for the monetization strategy orchestrator
//!
//! Contains the identifiers, context and envelope types that cross crate
//! boundaries, plus the tracing setup used by every binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;

use serde_json::Value;

/// Parse a JSON document that must be an object into a [`Payload`]
pub fn parse_payload(input: &str) -> SharedResult<Payload> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => Ok(map),
        other => Err(SharedError::NotAnObject {
            found: json_kind(&other).to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
