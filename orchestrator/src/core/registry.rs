//! Strategy registry
//!
//! Maps strategy ids to handlers. Lookups take a shared read lock and may run
//! concurrently; register/replace/unregister take the write lock and exclude
//! every other access. Handlers are handed out as `Arc`s so no lock is held
//! while a strategy runs.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context as _;
use serde_json::Value;
use shared::{component_debug, component_info, Component, ExecutionContext, StrategyId};
use tokio::sync::RwLock;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::StrategyHandler;

/// Shared handle to a registered strategy
pub type SharedStrategy = Arc<dyn StrategyHandler>;

/// Registry of named monetization strategies
#[derive(Default)]
pub struct StrategyRegistry {
    handlers: RwLock<HashMap<StrategyId, SharedStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `handler`; fails if `id` is already bound
    pub async fn register<H>(&self, id: impl Into<StrategyId>, handler: H) -> OrchestratorResult<()>
    where
        H: StrategyHandler + 'static,
    {
        self.register_shared(id, Arc::new(handler)).await
    }

    /// Bind `id` to an already shared handler; fails if `id` is already bound
    pub async fn register_shared(&self, id: impl Into<StrategyId>, handler: SharedStrategy) -> OrchestratorResult<()> {
        let id = id.into();
        let mut handlers = self.handlers.write().await;

        if handlers.contains_key(&id) {
            return Err(OrchestratorError::DuplicateStrategy { strategy_id: id });
        }

        component_info!(Component::Registry, strategy_id = %id, "📋 Registered strategy");
        handlers.insert(id, handler);
        Ok(())
    }

    /// Bind `id` to `handler`, overwriting any existing binding
    ///
    /// Returns the handler that was previously bound, if any.
    pub async fn replace<H>(&self, id: impl Into<StrategyId>, handler: H) -> Option<SharedStrategy>
    where
        H: StrategyHandler + 'static,
    {
        let id = id.into();
        let mut handlers = self.handlers.write().await;
        let previous = handlers.insert(id.clone(), Arc::new(handler));

        component_info!(
            Component::Registry,
            strategy_id = %id,
            replaced = previous.is_some(),
            "📋 Bound strategy with explicit overwrite"
        );
        previous
    }

    /// Remove the binding for `id` and return its handler
    pub async fn unregister(&self, id: &str) -> OrchestratorResult<SharedStrategy> {
        let mut handlers = self.handlers.write().await;
        let removed = handlers
            .remove(id)
            .ok_or_else(|| OrchestratorError::not_found(id))?;

        component_info!(Component::Registry, strategy_id = %id, "🗑️ Unregistered strategy");
        Ok(removed)
    }

    /// Return the handler bound to `id`
    pub async fn lookup(&self, id: &str) -> OrchestratorResult<SharedStrategy> {
        let handlers = self.handlers.read().await;
        match handlers.get(id) {
            Some(handler) => Ok(Arc::clone(handler)),
            None => {
                component_debug!(Component::Registry, strategy_id = %id, "Lookup for unknown strategy");
                Err(OrchestratorError::not_found(id))
            }
        }
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.handlers.read().await.contains_key(id)
    }

    /// All registered ids in sorted order
    pub async fn strategy_ids(&self) -> Vec<StrategyId> {
        let handlers = self.handlers.read().await;
        let mut ids: Vec<StrategyId> = handlers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.handlers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.handlers.read().await.is_empty()
    }
}

/// Strategy backed by a synchronous, non-blocking function
pub struct FnStrategy<F> {
    func: F,
}

impl<F> FnStrategy<F>
where
    F: Fn(ExecutionContext) -> anyhow::Result<Value> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait::async_trait]
impl<F> StrategyHandler for FnStrategy<F>
where
    F: Fn(ExecutionContext) -> anyhow::Result<Value> + Send + Sync,
{
    async fn execute(&self, context: ExecutionContext) -> anyhow::Result<Value> {
        (self.func)(context)
    }
}

/// Strategy backed by a function that may block on I/O
///
/// Each invocation runs on tokio's blocking pool so it never stalls the
/// async scheduler.
pub struct BlockingStrategy<F> {
    func: Arc<F>,
}

impl<F> BlockingStrategy<F>
where
    F: Fn(ExecutionContext) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func: Arc::new(func) }
    }
}

#[async_trait::async_trait]
impl<F> StrategyHandler for BlockingStrategy<F>
where
    F: Fn(ExecutionContext) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    async fn execute(&self, context: ExecutionContext) -> anyhow::Result<Value> {
        let func = Arc::clone(&self.func);
        tokio::task::spawn_blocking(move || func(context))
            .await
            .context("blocking strategy task did not complete")?
    }
}
