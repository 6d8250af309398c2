//! Core business logic modules
//!
//! This module contains the pipeline building blocks with no I/O of their own.
//! Collaborators are reached only through the traits in `crate::traits`.

pub mod context;
pub mod insights;
pub mod registry;

pub use context::ContextBuilder;
pub use insights::{generate_insights, AnalysisResult, InsightThresholds, Trend};
pub use registry::{BlockingStrategy, FnStrategy, SharedStrategy, StrategyRegistry};
