//! Revenue series collaborators
//!
//! Reference data processor and metrics collector for plain revenue series.
//! They normalize the input into `{"revenue": [f64, ...]}` and compute the
//! metrics read by the insight rules.

use anyhow::{anyhow, bail, Context as _};
use serde_json::{json, Value};
use shared::Payload;

use crate::core::insights::{REVENUE_GROWTH, VOLATILITY};
use crate::traits::{DataProcessor, MetricsCollector};

const REVENUE: &str = "revenue";
const PERIODS: &str = "periods";

/// Normalizes revenue input into a flat series
///
/// Accepts either `{"revenue": [numbers]}` or
/// `{"periods": [{"revenue": number}, ...]}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesDataProcessor;

impl SeriesDataProcessor {
    fn series(raw: &Value) -> anyhow::Result<Vec<f64>> {
        if let Some(values) = raw.get(REVENUE) {
            let values = values
                .as_array()
                .ok_or_else(|| anyhow!("'{REVENUE}' must be an array of numbers"))?;
            return values
                .iter()
                .enumerate()
                .map(|(index, value)| number(value).with_context(|| format!("revenue[{index}]")))
                .collect();
        }

        if let Some(periods) = raw.get(PERIODS) {
            let periods = periods
                .as_array()
                .ok_or_else(|| anyhow!("'{PERIODS}' must be an array of objects"))?;
            return periods
                .iter()
                .enumerate()
                .map(|(index, period)| {
                    period
                        .get(REVENUE)
                        .ok_or_else(|| anyhow!("missing '{REVENUE}'"))
                        .and_then(number)
                        .with_context(|| format!("periods[{index}]"))
                })
                .collect();
        }

        bail!("expected a '{REVENUE}' series or a '{PERIODS}' list")
    }
}

fn number(value: &Value) -> anyhow::Result<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| anyhow!("expected a finite number, found {value}"))
}

#[async_trait::async_trait]
impl DataProcessor for SeriesDataProcessor {
    async fn transform(&self, raw: &Value) -> anyhow::Result<Value> {
        let series = Self::series(raw).context("failed to normalize revenue data")?;
        let mut normalized = Payload::new();
        normalized.insert(REVENUE.to_string(), json!(series));
        Ok(Value::Object(normalized))
    }
}

/// Computes summary metrics over a normalized revenue series
///
/// `revenue_growth` is omitted when it cannot be computed (fewer than two
/// periods or a zero first period); `volatility` is omitted when the mean
/// is zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesMetricsCollector;

#[async_trait::async_trait]
impl MetricsCollector for SeriesMetricsCollector {
    async fn compute(&self, processed: &Value) -> anyhow::Result<Payload> {
        let series: Vec<f64> = processed
            .get(REVENUE)
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("processed data has no '{REVENUE}' series"))?
            .iter()
            .map(number)
            .collect::<anyhow::Result<_>>()?;

        let mut metrics = Payload::new();
        metrics.insert("periods".to_string(), json!(series.len()));

        if series.is_empty() {
            return Ok(metrics);
        }

        let total: f64 = series.iter().sum();
        let mean = total / series.len() as f64;
        metrics.insert("total_revenue".to_string(), json!(total));
        metrics.insert("average_revenue".to_string(), json!(mean));

        if let (Some(first), Some(last)) = (series.first(), series.last()) {
            if series.len() >= 2 && *first != 0.0 {
                metrics.insert(REVENUE_GROWTH.to_string(), json!(last / first - 1.0));
            }
        }

        if mean != 0.0 {
            let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / series.len() as f64;
            metrics.insert(VOLATILITY.to_string(), json!(variance.sqrt() / mean.abs()));
        }

        Ok(metrics)
    }
}
