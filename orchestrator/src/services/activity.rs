//! Activity sink backed by tracing

use shared::{component_info, Component};

use crate::traits::{Activity, ActivitySink};

/// Emits every activity as an info-level tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActivitySink;

impl ActivitySink for TracingActivitySink {
    fn record(&self, activity: &Activity) -> anyhow::Result<()> {
        component_info!(
            Component::Optimizer,
            activity = %activity.kind,
            strategy_id = %activity.strategy_id,
            "📋 {}",
            activity.message
        );
        Ok(())
    }
}
