//! Monetization strategy orchestrator
//!
//! A registry of named, pluggable monetization strategies plus the pipeline
//! around it: context preparation, dispatch, parameter optimization ahead of
//! dispatch, and trend analysis that feeds recommendations back to callers.
//! Pricing models, data processors and other collaborators are injected
//! through the traits in [`traits`].

pub mod analytics;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod optimizer;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use analytics::{AnalysisOutcome, RevenueAnalytics};
pub use config::OrchestratorConfig;
pub use dispatcher::{StrategyDispatcher, StrategyOutcome};
pub use crate::core::{
    AnalysisResult, BlockingStrategy, ContextBuilder, FnStrategy, InsightThresholds, SharedStrategy, StrategyRegistry,
    Trend,
};
pub use error::{AnalysisStage, Operation, OrchestratorError, OrchestratorResult};
pub use optimizer::{MonetizationOptimizer, OptimizationOutcome, REQUIRED_FIELDS};
pub use traits::*;
