//! Insight derivation from revenue metrics
//!
//! Pure business logic: a function of the metrics mapping and thresholds,
//! with no I/O and no clock.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use shared::Payload;

/// Metric key holding fractional revenue change across the analyzed window
pub const REVENUE_GROWTH: &str = "revenue_growth";

/// Metric key holding the coefficient of variation of revenue
pub const VOLATILITY: &str = "volatility";

/// Direction of the revenue trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
    Unknown,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Stable => write!(f, "stable"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Unknown => write!(f, "unknown"),
        }
    }
}

/// Thresholds used when classifying metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Growth magnitude above which the trend is no longer stable
    pub growth_threshold: f64,

    /// Volatility above which a smoothing recommendation is added
    pub volatility_threshold: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            growth_threshold: 0.05,
            volatility_threshold: 0.25,
        }
    }
}

/// Trend classification plus recommendations derived from one metrics mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    trend: Trend,
    recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Derive insights from computed metrics
pub fn generate_insights(metrics: &Payload, thresholds: &InsightThresholds) -> AnalysisResult {
    let trend = match metric(metrics, REVENUE_GROWTH) {
        Some(growth) if growth > thresholds.growth_threshold => Trend::Increasing,
        Some(growth) if growth < -thresholds.growth_threshold => Trend::Decreasing,
        Some(_) => Trend::Stable,
        None => Trend::Unknown,
    };

    let mut recommendations = vec![trend_recommendation(trend).to_string()];

    if let Some(volatility) = metric(metrics, VOLATILITY) {
        if volatility > thresholds.volatility_threshold {
            recommendations.push("Smooth revenue volatility with subscription or bundle offers".to_string());
        }
    }

    AnalysisResult { trend, recommendations }
}

fn trend_recommendation(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing => "Increase pricing during peak periods",
        Trend::Decreasing => "Introduce retention offers to slow the revenue decline",
        Trend::Stable => "Test a premium tier to unlock additional growth",
        Trend::Unknown => "Collect more revenue history before adjusting pricing",
    }
}

fn metric(metrics: &Payload, key: &str) -> Option<f64> {
    metrics.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}
