//! Test fixtures and data for orchestrator tests
//!
//! This module provides consistent test data and fixtures used across all test suites.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use shared::Payload;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const DISCOUNT_V1: &'static str = "discount_v1";
    pub const MISSING_ID: &'static str = "missing_id";
    pub const SYSTEM_ID: &'static str = "sys-test-01";
    pub const TIMESTAMP: &'static str = "2026-02-01T08:15:00.000000Z";

    /// Instant returned by the fixed test clock
    pub fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 8, 15, 0).unwrap()
    }

    /// Build a payload from a JSON object literal
    pub fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("payload fixture must be an object, got {other}"),
        }
    }

    /// Valid optimization request
    pub fn optimization_request() -> Payload {
        Self::payload(json!({"revenue_target": 100, "time_frame": "Q1"}))
    }

    /// Optimization requests missing at least one required field
    pub fn invalid_optimization_requests() -> Vec<Payload> {
        vec![
            Payload::new(),
            Self::payload(json!({"revenue_target": 100})),
            Self::payload(json!({"time_frame": "Q1"})),
            Self::payload(json!({"revenue": 100, "timeframe": "Q1"})),
            Self::payload(json!({"Revenue_Target": 100, "Time_Frame": "Q1", "x": [1, 2]})),
        ]
    }

    /// Quarterly revenue with clear growth
    pub fn growing_revenue() -> Value {
        json!({"revenue": [120.0, 135.5, 150.0, 171.25]})
    }

    /// Monthly revenue records with a decline and large swings
    pub fn declining_volatile_revenue() -> Value {
        json!({"periods": [
            {"month": "2026-01", "revenue": 900},
            {"month": "2026-02", "revenue": 200},
            {"month": "2026-03", "revenue": 650},
            {"month": "2026-04", "revenue": 300}
        ]})
    }
}
