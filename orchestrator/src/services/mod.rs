//! Service implementations
//!
//! Reference implementations of the collaborator traits. They let the
//! pipeline run end to end without defining any monetization model.

pub mod activity;
pub mod clock;
pub mod diagnostics;
pub mod identity;
pub mod series;

#[cfg(test)]
mod tests;

pub use activity::TracingActivitySink;
pub use clock::SystemClock;
pub use diagnostics::{EchoContextStrategy, ECHO_CONTEXT};
pub use identity::StaticIdentity;
pub use series::{SeriesDataProcessor, SeriesMetricsCollector};
