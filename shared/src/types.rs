//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Request payload and strategy parameters: an ordered mapping of string keys to JSON values
pub type Payload = Map<String, Value>;

/// Context key holding the ISO-8601 creation timestamp
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Context key holding the identity of the running system
pub const SYSTEM_ID_KEY: &str = "system_id";

/// Opaque, case-sensitive identifier of a registered strategy
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(String);

impl StrategyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StrategyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StrategyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StrategyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StrategyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-call merged mapping of common metadata and request parameters
///
/// A context is created once per dispatch and handed to the strategy handler
/// by value. It exposes no mutators; callers that need a different context
/// build a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext(Payload);

impl ExecutionContext {
    /// Merge `payload` over the common fields; payload keys win on conflict
    pub fn merge(timestamp: String, system_id: String, payload: Payload) -> Self {
        let mut fields = Payload::with_capacity(payload.len() + 2);
        fields.insert(TIMESTAMP_KEY.to_string(), Value::String(timestamp));
        fields.insert(SYSTEM_ID_KEY.to_string(), Value::String(system_id));
        for (key, value) in payload {
            fields.insert(key, value);
        }
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Timestamp field, if it is still a string after the merge
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get(TIMESTAMP_KEY).and_then(Value::as_str)
    }

    /// System identity field, if it is still a string after the merge
    pub fn system_id(&self) -> Option<&str> {
        self.0.get(SYSTEM_ID_KEY).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Payload {
        &self.0
    }

    pub fn into_inner(self) -> Payload {
        self.0
    }
}

/// Status tag of a success envelope; failures are reported as errors instead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
}

/// Pipeline components, used to tag log events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Registry,
    ContextBuilder,
    Dispatcher,
    Optimizer,
    Analytics,
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Registry => write!(f, "registry"),
            Component::ContextBuilder => write!(f, "context_builder"),
            Component::Dispatcher => write!(f, "dispatcher"),
            Component::Optimizer => write!(f, "optimizer"),
            Component::Analytics => write!(f, "analytics"),
            Component::Cli => write!(f, "cli"),
        }
    }
}
