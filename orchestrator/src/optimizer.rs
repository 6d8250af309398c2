//! Revenue optimizer
//!
//! Validates an optimization request, asks the pricing collaborator for
//! adjusted parameters and forwards them to strategy dispatch. Activity
//! recording along the way is best-effort.

use std::panic::AssertUnwindSafe;

use anyhow::Context as _;
use serde::Serialize;
use shared::{component_debug, component_error, component_warn, Component, ExecutionStatus, Payload};

use crate::error::{catch_panic, Operation, OrchestratorError, OrchestratorResult};
use crate::dispatcher::StrategyOutcome;
use crate::traits::{Activity, ActivityKind, ActivitySink, PricingPredictor, StrategyExecutor};

/// Fields every optimization request must carry
pub const REQUIRED_FIELDS: [&str; 2] = ["revenue_target", "time_frame"];

/// Success envelope of an optimization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationOutcome {
    pub status: ExecutionStatus,

    /// Parameters produced by the pricing collaborator and dispatched
    pub parameters: Payload,

    /// Envelope returned by the dispatched strategy
    pub result: StrategyOutcome,
}

/// Check that `payload` carries every required optimization field
///
/// Presence is what counts; the values themselves are left to the pricing
/// collaborator.
pub fn validate_payload(payload: &Payload) -> OrchestratorResult<()> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !payload.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(OrchestratorError::InvalidPayload { missing })
    }
}

/// Optimizes revenue by rewriting parameters before dispatch
pub struct MonetizationOptimizer<P, E, S>
where
    P: PricingPredictor,
    E: StrategyExecutor,
    S: ActivitySink,
{
    pricing: P,
    executor: E,
    activity: S,
}

impl<P, E, S> MonetizationOptimizer<P, E, S>
where
    P: PricingPredictor,
    E: StrategyExecutor,
    S: ActivitySink,
{
    pub fn new(pricing: P, executor: E, activity: S) -> Self {
        Self {
            pricing,
            executor,
            activity,
        }
    }

    /// Optimize revenue streams using `strategy_id`
    ///
    /// Missing required fields surface as `InvalidPayload`. Every later
    /// failure, including a panic in a collaborator or an unknown strategy,
    /// is an `Integration` error; one already normalized by dispatch is
    /// returned unchanged.
    pub async fn optimize_revenue(&self, strategy_id: &str, payload: Payload) -> OrchestratorResult<OptimizationOutcome> {
        validate_payload(&payload)?;

        self.log_activity(Activity::new(
            ActivityKind::OptimizationRequested,
            strategy_id,
            REQUIRED_FIELDS
                .iter()
                .filter_map(|field| payload.get(*field).map(|value| format!("{field}={value}")))
                .collect::<Vec<_>>()
                .join(", "),
        ));

        let predicted = catch_panic("pricing predictor", async { self.pricing.predict_optimal_prices(&payload).await })
            .await
            .and_then(|result| result)
            .context("pricing predictor failed to produce optimal prices");
        let parameters = match predicted {
            Ok(parameters) => parameters,
            Err(cause) => {
                component_error!(
                    Component::Optimizer,
                    strategy_id,
                    collaborator = "pricing_predictor",
                    cause = %format!("{cause:#}"),
                    "❌ Error during revenue optimization"
                );
                self.log_activity(Activity::new(
                    ActivityKind::OptimizationFailed,
                    strategy_id,
                    format!("{cause:#}"),
                ));
                return Err(OrchestratorError::integration(Operation::Optimization, strategy_id, cause));
            }
        };

        self.log_activity(Activity::new(
            ActivityKind::ParametersPredicted,
            strategy_id,
            format!("{} optimized parameters", parameters.len()),
        ));

        let dispatched = catch_panic("strategy dispatch", async {
            self.executor.execute(strategy_id, parameters.clone()).await
        })
        .await
        .unwrap_or_else(|cause| Err(OrchestratorError::integration(Operation::Optimization, strategy_id, cause)));

        match dispatched {
            Ok(result) => {
                self.log_activity(Activity::new(
                    ActivityKind::OptimizationCompleted,
                    strategy_id,
                    "strategy executed with optimized parameters",
                ));
                Ok(OptimizationOutcome {
                    status: ExecutionStatus::Success,
                    parameters,
                    result,
                })
            }
            Err(err) => {
                let err = match err {
                    OrchestratorError::Integration { .. } => err,
                    other => OrchestratorError::integration(Operation::Optimization, strategy_id, anyhow::Error::new(other)),
                };
                component_error!(
                    Component::Optimizer,
                    strategy_id,
                    collaborator = "dispatcher",
                    error = %err,
                    "❌ Error during revenue optimization"
                );
                self.log_activity(Activity::new(ActivityKind::OptimizationFailed, strategy_id, err.to_string()));
                Err(err)
            }
        }
    }

    /// Record an activity; sink failures and panics are logged and swallowed
    fn log_activity(&self, activity: Activity) {
        component_debug!(
            Component::Optimizer,
            kind = %activity.kind,
            strategy_id = %activity.strategy_id,
            "{}",
            activity.message
        );

        match std::panic::catch_unwind(AssertUnwindSafe(|| self.activity.record(&activity))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                component_warn!(Component::Optimizer, kind = %activity.kind, "Activity sink unavailable: {err:#}");
            }
            Err(_) => {
                component_warn!(Component::Optimizer, kind = %activity.kind, "Activity sink panicked");
            }
        }
    }
}
