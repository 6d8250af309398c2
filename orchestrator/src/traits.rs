//! Trait definitions with mockall annotations for testing
//!
//! These are the seams between the pipeline and its collaborators. The
//! pipeline calls through them but never implements the business behavior
//! behind them; `services` holds reference implementations.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::{ExecutionContext, Payload, StrategyId};

use crate::error::OrchestratorResult;
use crate::dispatcher::StrategyOutcome;

/// Source of the current time for execution contexts
#[mockall::automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the running system's identity
///
/// Implementations must return the same value for the lifetime of the process.
#[mockall::automock]
pub trait IdentityProvider: Send + Sync {
    fn current_system_id(&self) -> String;
}

/// A pluggable unit of monetization logic
///
/// Handlers keep no state between invocations; everything they need arrives
/// in the context or through collaborators injected at construction.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StrategyHandler: Send + Sync {
    async fn execute(&self, context: ExecutionContext) -> anyhow::Result<Value>;
}

impl fmt::Debug for dyn StrategyHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StrategyHandler")
    }
}

/// Anything that can dispatch a strategy by id
///
/// Implemented by [`crate::StrategyDispatcher`]; the optimizer depends on this
/// trait so it can be tested without a registry.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StrategyExecutor: Send + Sync {
    async fn execute(&self, strategy_id: &str, payload: Payload) -> OrchestratorResult<StrategyOutcome>;
}

#[async_trait::async_trait]
impl<T> StrategyExecutor for Arc<T>
where
    T: StrategyExecutor + ?Sized,
{
    async fn execute(&self, strategy_id: &str, payload: Payload) -> OrchestratorResult<StrategyOutcome> {
        (**self).execute(strategy_id, payload).await
    }
}

/// Pricing/prediction model consulted before an optimized dispatch
#[mockall::automock]
#[async_trait::async_trait]
pub trait PricingPredictor: Send + Sync {
    /// Produce the parameters to dispatch with, given a validated optimization request
    async fn predict_optimal_prices(&self, payload: &Payload) -> anyhow::Result<Payload>;
}

/// Turns raw financial data into a normalized, metrics-ready form
#[mockall::automock]
#[async_trait::async_trait]
pub trait DataProcessor: Send + Sync {
    async fn transform(&self, raw: &Value) -> anyhow::Result<Value>;
}

/// Computes key metrics from processed financial data
#[mockall::automock]
#[async_trait::async_trait]
pub trait MetricsCollector: Send + Sync {
    async fn compute(&self, processed: &Value) -> anyhow::Result<Payload>;
}

/// Destination for optimizer activity records
///
/// Recording is best-effort: callers log and ignore failures.
#[mockall::automock]
pub trait ActivitySink: Send + Sync {
    fn record(&self, activity: &Activity) -> anyhow::Result<()>;
}

/// Kind of optimizer activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    OptimizationRequested,
    ParametersPredicted,
    OptimizationCompleted,
    OptimizationFailed,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::OptimizationRequested => write!(f, "optimization_requested"),
            ActivityKind::ParametersPredicted => write!(f, "parameters_predicted"),
            ActivityKind::OptimizationCompleted => write!(f, "optimization_completed"),
            ActivityKind::OptimizationFailed => write!(f, "optimization_failed"),
        }
    }
}

/// One optimizer activity record
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub strategy_id: StrategyId,
    pub message: String,
}

impl Activity {
    pub fn new(kind: ActivityKind, strategy_id: impl Into<StrategyId>, message: impl Into<String>) -> Self {
        Self {
            kind,
            strategy_id: strategy_id.into(),
            message: message.into(),
        }
    }
}
