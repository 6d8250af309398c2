//! Test helpers and builder patterns for orchestrator tests
//!
//! This module provides convenient helper functions and builder patterns
//! to reduce test boilerplate and improve maintainability.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use orchestrator::{
    MockActivitySink, MockClock, MockIdentityProvider, StrategyDispatcher, StrategyHandler, StrategyRegistry,
};
use serde_json::Value;
use shared::ExecutionContext;

use super::fixtures::TestFixtures;

/// Type alias for a dispatcher wired with deterministic mocks
pub type TestDispatcher = StrategyDispatcher<MockClock, MockIdentityProvider>;

/// Builder for dispatchers with a fixed clock and identity
pub struct DispatcherBuilder {
    registry: Arc<StrategyRegistry>,
    system_id: String,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(StrategyRegistry::new()),
            system_id: TestFixtures::SYSTEM_ID.to_string(),
        }
    }

    /// Use an existing registry
    pub fn with_registry(mut self, registry: Arc<StrategyRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_system_id(mut self, system_id: &str) -> Self {
        self.system_id = system_id.to_string();
        self
    }

    pub fn build(self) -> TestDispatcher {
        let mut clock = MockClock::new();
        clock.expect_now().returning(TestFixtures::fixed_instant);

        let system_id = self.system_id;
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_system_id()
            .returning(move || system_id.clone());

        StrategyDispatcher::new(self.registry, clock, identity)
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strategy that records how often it ran and returns its context
pub struct CountingStrategy {
    calls: Arc<AtomicUsize>,
}

impl CountingStrategy {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Self { calls: Arc::clone(&calls) }, calls)
    }
}

#[async_trait::async_trait]
impl StrategyHandler for CountingStrategy {
    async fn execute(&self, context: ExecutionContext) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Object(context.into_inner()))
    }
}

/// Activity sink mock that accepts everything
pub fn accepting_sink() -> MockActivitySink {
    let mut sink = MockActivitySink::new();
    sink.expect_record().returning(|_| Ok(()));
    sink
}
