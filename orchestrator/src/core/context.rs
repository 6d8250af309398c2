//! Execution context preparation
//!
//! Merges the request payload with process-wide metadata. The clock and the
//! identity provider are injected so the result is deterministic under test.

use chrono::SecondsFormat;
use shared::{ExecutionContext, Payload};

use crate::traits::{Clock, IdentityProvider};

/// Builds per-call execution contexts
pub struct ContextBuilder<C, I>
where
    C: Clock,
    I: IdentityProvider,
{
    clock: C,
    identity: I,
}

impl<C, I> ContextBuilder<C, I>
where
    C: Clock,
    I: IdentityProvider,
{
    pub fn new(clock: C, identity: I) -> Self {
        Self { clock, identity }
    }

    /// Build a new context: common fields first, payload keys override them
    pub fn build(&self, payload: Payload) -> ExecutionContext {
        let timestamp = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Micros, true);
        let system_id = self.identity.current_system_id();

        ExecutionContext::merge(timestamp, system_id, payload)
    }
}
