//! Unit tests for individual orchestrator components
//!
//! These tests exercise the public API of each building block on its own,
//! using the shared fixtures and builders.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use orchestrator::services::{StaticIdentity, SystemClock};
use orchestrator::core::generate_insights;
use orchestrator::optimizer::validate_payload;
use orchestrator::{
    ContextBuilder, FnStrategy, InsightThresholds, MockClock, MockIdentityProvider, Operation, OrchestratorError,
    SharedStrategy, StrategyHandler, StrategyOutcome, StrategyRegistry, Trend,
};
use serde_json::json;
use shared::{ExecutionContext, Payload};

mod common;
use common::{CountingStrategy, TestFixtures};

/// A registered handler is returned as the very same shared instance
#[tokio::test]
async fn test_registry_lookup_returns_registered_handler() {
    let registry = StrategyRegistry::new();
    let handler: SharedStrategy = Arc::new(CountingStrategy::new().0);
    registry
        .register_shared(TestFixtures::DISCOUNT_V1, Arc::clone(&handler))
        .await
        .unwrap();

    let found = registry.lookup(TestFixtures::DISCOUNT_V1).await.unwrap();

    assert!(Arc::ptr_eq(&found, &handler));
    assert!(registry.exists(TestFixtures::DISCOUNT_V1).await);
    assert!(!registry.exists(TestFixtures::MISSING_ID).await);
}

/// Duplicate registration keeps the original handler
#[tokio::test]
async fn test_registry_rejects_duplicates() {
    let registry = StrategyRegistry::new();
    let original: SharedStrategy = Arc::new(FnStrategy::new(|_| Ok(json!("first"))));
    registry
        .register_shared(TestFixtures::DISCOUNT_V1, Arc::clone(&original))
        .await
        .unwrap();

    let result = registry
        .register(TestFixtures::DISCOUNT_V1, FnStrategy::new(|_| Ok(json!("second"))))
        .await;

    assert_matches!(result, Err(OrchestratorError::DuplicateStrategy { .. }));
    let found = registry.lookup(TestFixtures::DISCOUNT_V1).await.unwrap();
    assert!(Arc::ptr_eq(&found, &original));
}

/// Replace swaps the handler and hands back the previous one
#[tokio::test]
async fn test_registry_replace_and_unregister() {
    let registry = StrategyRegistry::new();
    assert!(registry
        .replace("pricing", FnStrategy::new(|_| Ok(json!(1))))
        .await
        .is_none());
    assert!(registry
        .replace("pricing", FnStrategy::new(|_| Ok(json!(2))))
        .await
        .is_some());
    assert_eq!(registry.len().await, 1);

    registry.unregister("pricing").await.unwrap();

    assert!(registry.is_empty().await);
    assert_matches!(
        registry.unregister("pricing").await,
        Err(OrchestratorError::StrategyNotFound { .. })
    );
}

/// The context builder stamps metadata from the injected collaborators
#[test]
fn test_context_builder_with_fixed_collaborators() {
    let mut clock = MockClock::new();
    clock.expect_now().times(1).returning(TestFixtures::fixed_instant);
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_current_system_id()
        .times(1)
        .returning(|| TestFixtures::SYSTEM_ID.to_string());
    let builder = ContextBuilder::new(clock, identity);

    let context = builder.build(TestFixtures::payload(json!({"campaign": "spring"})));

    assert_eq!(context.timestamp(), Some(TestFixtures::TIMESTAMP));
    assert_eq!(context.system_id(), Some(TestFixtures::SYSTEM_ID));
    assert_eq!(context.get("campaign"), Some(&json!("spring")));
    assert_eq!(context.len(), 3);
}

/// Payload keys replace the generated ones
#[test]
fn test_context_builder_payload_wins() {
    let builder = ContextBuilder::new(SystemClock::new(), StaticIdentity::new("sys-a"));

    let context = builder.build(TestFixtures::payload(json!({"system_id": "x", "timestamp": "then"})));

    assert_eq!(context.system_id(), Some("x"));
    assert_eq!(context.timestamp(), Some("then"));
    assert_eq!(context.len(), 2);
}

/// Contexts built in quick succession never go back in time
#[test]
fn test_context_timestamps_are_ordered() {
    let builder = ContextBuilder::new(SystemClock::new(), StaticIdentity::new("sys-a"));

    let stamps: Vec<String> = (0..50)
        .map(|_| builder.build(Payload::new()).timestamp().unwrap_or_default().to_string())
        .collect();

    // Fixed-width UTC timestamps compare correctly as strings
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

/// Error messages name the strategy and what was missing
#[test]
fn test_error_messages() {
    assert_eq!(
        OrchestratorError::not_found("missing_id").to_string(),
        "Strategy missing_id not found"
    );
    assert_eq!(
        OrchestratorError::InvalidPayload {
            missing: vec!["time_frame".to_string()]
        }
        .to_string(),
        "Invalid payload provided: missing time_frame"
    );
    assert_eq!(
        OrchestratorError::integration(Operation::Dispatch, "discount_v1", anyhow::anyhow!("boom")).to_string(),
        "Failed strategy dispatch for strategy discount_v1"
    );
}

/// Caller mistakes count as validation errors, downstream failures do not
#[test]
fn test_validation_classification() {
    assert!(OrchestratorError::InvalidPayload { missing: vec![] }.is_validation());
    assert!(OrchestratorError::not_found("x").is_validation());
    assert!(!OrchestratorError::integration(Operation::Optimization, "x", anyhow::anyhow!("e")).is_validation());
}

/// Required fields are checked by presence only
#[test]
fn test_validate_payload() {
    assert!(validate_payload(&TestFixtures::optimization_request()).is_ok());
    for payload in TestFixtures::invalid_optimization_requests() {
        assert_matches!(
            validate_payload(&payload),
            Err(OrchestratorError::InvalidPayload { ref missing }) if !missing.is_empty()
        );
    }
}

/// Thresholds decide where a trend stops being stable
#[test]
fn test_custom_insight_thresholds() {
    let metrics = TestFixtures::payload(json!({"revenue_growth": 0.08, "volatility": 0.1}));
    let strict = InsightThresholds {
        growth_threshold: 0.1,
        volatility_threshold: 0.05,
    };

    let default_result = generate_insights(&metrics, &InsightThresholds::default());
    let strict_result = generate_insights(&metrics, &strict);

    assert_eq!(default_result.trend(), Trend::Increasing);
    assert_eq!(default_result.recommendations().len(), 1);
    assert_eq!(strict_result.trend(), Trend::Stable);
    assert_eq!(strict_result.recommendations().len(), 2);
}

/// Missing growth metrics leave the trend unknown
#[test]
fn test_insights_without_growth() {
    let result = generate_insights(&Payload::new(), &InsightThresholds::default());

    assert_eq!(result.trend(), Trend::Unknown);
    assert_eq!(result.recommendations().len(), 1);
}

/// Analysis envelopes serialize with lowercase status and trend
#[test]
fn test_outcome_serialization() {
    let outcome = StrategyOutcome::success(json!({"discount": 0.15}));
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"status": "success", "result": {"discount": 0.15}})
    );

    let analysis = generate_insights(
        &TestFixtures::payload(json!({"revenue_growth": -0.2})),
        &InsightThresholds::default(),
    );
    assert_eq!(serde_json::to_value(&analysis).unwrap()["trend"], json!("decreasing"));
}

/// Handlers see the whole context through the trait object
#[tokio::test]
async fn test_fn_strategy_reads_context() {
    let handler: SharedStrategy = Arc::new(FnStrategy::new(|context: ExecutionContext| {
        Ok(json!(context.contains_key("revenue_target")))
    }));
    let instant = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap() + ChronoDuration::milliseconds(5);
    let context = ExecutionContext::merge(
        instant.to_rfc3339(),
        TestFixtures::SYSTEM_ID.to_string(),
        TestFixtures::optimization_request(),
    );

    let result = handler.execute(context).await.unwrap();

    assert_eq!(result, json!(true));
}
