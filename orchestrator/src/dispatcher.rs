//! Strategy dispatcher
//!
//! Entry point of the pipeline: checks the strategy exists, builds the
//! execution context, invokes the handler and normalizes any handler failure
//! into a single integration error. No retries happen here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use serde::Serialize;
use serde_json::Value;
use shared::{component_debug, component_error, Component, ExecutionStatus, Payload};
use uuid::Uuid;

use crate::core::{ContextBuilder, StrategyRegistry};
use crate::error::{catch_panic, Operation, OrchestratorError, OrchestratorResult};
use crate::traits::{Clock, IdentityProvider, StrategyExecutor};

/// Success envelope of a strategy dispatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub status: ExecutionStatus,
    pub result: Value,
}

impl StrategyOutcome {
    pub fn success(result: Value) -> Self {
        Self {
            status: ExecutionStatus::Success,
            result,
        }
    }
}

/// Dispatches named strategies with a freshly built context
pub struct StrategyDispatcher<C, I>
where
    C: Clock,
    I: IdentityProvider,
{
    registry: Arc<StrategyRegistry>,
    contexts: ContextBuilder<C, I>,
}

impl<C, I> StrategyDispatcher<C, I>
where
    C: Clock,
    I: IdentityProvider,
{
    /// Create a dispatcher over `registry` with injected clock and identity
    pub fn new(registry: Arc<StrategyRegistry>, clock: C, identity: I) -> Self {
        Self {
            registry,
            contexts: ContextBuilder::new(clock, identity),
        }
    }

    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// Execute `strategy_id` with `payload` merged into a new context
    pub async fn execute(&self, strategy_id: &str, payload: Payload) -> OrchestratorResult<StrategyOutcome> {
        self.dispatch(strategy_id, payload, None).await
    }

    /// Like [`execute`](Self::execute), but fail with an integration error if
    /// the handler does not finish within `timeout`
    pub async fn execute_with_timeout(
        &self,
        strategy_id: &str,
        payload: Payload,
        timeout: Duration,
    ) -> OrchestratorResult<StrategyOutcome> {
        self.dispatch(strategy_id, payload, Some(timeout)).await
    }

    async fn dispatch(
        &self,
        strategy_id: &str,
        payload: Payload,
        timeout: Option<Duration>,
    ) -> OrchestratorResult<StrategyOutcome> {
        // Unknown ids fail before any context is built or handler touched
        let handler = self.registry.lookup(strategy_id).await?;

        let dispatch_id = Uuid::new_v4();
        let context = self.contexts.build(payload);
        component_debug!(
            Component::Dispatcher,
            %dispatch_id,
            strategy_id,
            fields = context.len(),
            "Dispatching strategy"
        );

        let invocation = catch_panic("strategy handler", async move { handler.execute(context).await });
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, invocation).await {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow!("strategy did not finish within {}ms", limit.as_millis())),
            },
            None => invocation.await,
        }
        .and_then(|result| result);

        match result {
            Ok(value) => {
                component_debug!(Component::Dispatcher, %dispatch_id, strategy_id, "Strategy completed");
                Ok(StrategyOutcome::success(value))
            }
            Err(cause) => {
                component_error!(
                    Component::Dispatcher,
                    %dispatch_id,
                    strategy_id,
                    cause = %format!("{cause:#}"),
                    "❌ Error executing strategy {}",
                    strategy_id
                );
                Err(OrchestratorError::integration(Operation::Dispatch, strategy_id, cause))
            }
        }
    }
}

#[async_trait::async_trait]
impl<C, I> StrategyExecutor for StrategyDispatcher<C, I>
where
    C: Clock,
    I: IdentityProvider,
{
    async fn execute(&self, strategy_id: &str, payload: Payload) -> OrchestratorResult<StrategyOutcome> {
        self.dispatch(strategy_id, payload, None).await
    }
}
