//! Orchestrator error taxonomy
//!
//! Every public pipeline operation fails with exactly one of these kinds.
//! Downstream causes are kept as the error source for diagnostics only.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use anyhow::anyhow;
use futures_util::FutureExt;
use shared::StrategyId;
use thiserror::Error;

/// Pipeline operation that hit a downstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dispatch,
    Optimization,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Dispatch => write!(f, "strategy dispatch"),
            Operation::Optimization => write!(f, "revenue optimization"),
        }
    }
}

/// Analysis step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Transform,
    Compute,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStage::Transform => write!(f, "transform"),
            AnalysisStage::Compute => write!(f, "compute"),
        }
    }
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Strategy {strategy_id} not found")]
    StrategyNotFound { strategy_id: StrategyId },

    #[error("Strategy {strategy_id} is already registered")]
    DuplicateStrategy { strategy_id: StrategyId },

    #[error("Invalid payload provided: missing {}", .missing.join(", "))]
    InvalidPayload { missing: Vec<String> },

    #[error("Failed {operation} for strategy {strategy_id}")]
    Integration {
        operation: Operation,
        strategy_id: StrategyId,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to generate revenue analysis ({stage} step)")]
    Analysis {
        stage: AnalysisStage,
        #[source]
        source: anyhow::Error,
    },
}

impl OrchestratorError {
    pub fn not_found(strategy_id: impl Into<StrategyId>) -> Self {
        OrchestratorError::StrategyNotFound { strategy_id: strategy_id.into() }
    }

    pub fn integration(operation: Operation, strategy_id: impl Into<StrategyId>, source: anyhow::Error) -> Self {
        OrchestratorError::Integration {
            operation,
            strategy_id: strategy_id.into(),
            source,
        }
    }

    /// True for errors caused by the caller's input rather than a downstream failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrchestratorError::StrategyNotFound { .. }
                | OrchestratorError::DuplicateStrategy { .. }
                | OrchestratorError::InvalidPayload { .. }
        )
    }

    /// Strategy referenced by this error, if any
    pub fn strategy_id(&self) -> Option<&StrategyId> {
        match self {
            OrchestratorError::StrategyNotFound { strategy_id }
            | OrchestratorError::DuplicateStrategy { strategy_id }
            | OrchestratorError::Integration { strategy_id, .. } => Some(strategy_id),
            OrchestratorError::InvalidPayload { .. } | OrchestratorError::Analysis { .. } => None,
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Await a collaborator future, reporting a panic inside it as an error
///
/// Pass an `async` block so a panic raised while the call is being set up is
/// caught as well.
pub(crate) async fn catch_panic<F>(collaborator: &str, future: F) -> anyhow::Result<F::Output>
where
    F: Future,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| anyhow!("{collaborator} panicked: {}", panic_message(panic.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
