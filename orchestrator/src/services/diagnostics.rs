//! Diagnostic strategies

use serde_json::Value;
use shared::ExecutionContext;

use crate::traits::StrategyHandler;

/// Id under which the CLI registers [`EchoContextStrategy`]
pub const ECHO_CONTEXT: &str = "echo_context";

/// Returns the execution context it was invoked with
///
/// Useful for checking what a strategy actually receives after the merge.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoContextStrategy;

#[async_trait::async_trait]
impl StrategyHandler for EchoContextStrategy {
    async fn execute(&self, context: ExecutionContext) -> anyhow::Result<Value> {
        Ok(Value::Object(context.into_inner()))
    }
}
