//! Revenue analytics
//!
//! Runs raw financial data through the data processor and the metrics
//! collector, then derives insights from the resulting metrics.

use serde::Serialize;
use serde_json::Value;
use shared::{component_debug, component_error, Component, ExecutionStatus};

use crate::core::insights::{generate_insights, AnalysisResult, InsightThresholds};
use crate::error::{catch_panic, AnalysisStage, OrchestratorError, OrchestratorResult};
use crate::traits::{DataProcessor, MetricsCollector};

/// Success envelope of a trend analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub status: ExecutionStatus,
    pub analysis: AnalysisResult,
}

/// Analytics engine for revenue trends
pub struct RevenueAnalytics<D, M>
where
    D: DataProcessor,
    M: MetricsCollector,
{
    processor: D,
    collector: M,
    thresholds: InsightThresholds,
}

impl<D, M> RevenueAnalytics<D, M>
where
    D: DataProcessor,
    M: MetricsCollector,
{
    /// Create with default thresholds
    pub fn new(processor: D, collector: M) -> Self {
        Self::with_thresholds(processor, collector, InsightThresholds::default())
    }

    /// Create with custom classification thresholds
    pub fn with_thresholds(processor: D, collector: M, thresholds: InsightThresholds) -> Self {
        Self {
            processor,
            collector,
            thresholds,
        }
    }

    /// Analyze revenue trends and generate recommendations
    ///
    /// Any failure of either collaborator, panics included, is reported as
    /// an `Analysis` error for the stage that failed.
    pub async fn analyze_trends(&self, raw: &Value) -> OrchestratorResult<AnalysisOutcome> {
        let processed = catch_panic("data processor", async { self.processor.transform(raw).await })
            .await
            .and_then(|result| result)
            .map_err(|source| Self::failure(AnalysisStage::Transform, source))?;

        let metrics = catch_panic("metrics collector", async { self.collector.compute(&processed).await })
            .await
            .and_then(|result| result)
            .map_err(|source| Self::failure(AnalysisStage::Compute, source))?;

        let analysis = generate_insights(&metrics, &self.thresholds);
        component_debug!(
            Component::Analytics,
            trend = %analysis.trend(),
            recommendations = analysis.recommendations().len(),
            "Revenue analysis complete"
        );

        Ok(AnalysisOutcome {
            status: ExecutionStatus::Success,
            analysis,
        })
    }

    fn failure(stage: AnalysisStage, source: anyhow::Error) -> OrchestratorError {
        component_error!(
            Component::Analytics,
            %stage,
            cause = %format!("{source:#}"),
            "❌ Error analyzing revenue trends"
        );
        OrchestratorError::Analysis { stage, source }
    }
}
