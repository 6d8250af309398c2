//! Main entry point for the monetization binary
//!
//! Wires the reference services into the pipeline and exposes dispatch and
//! trend analysis from the command line.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::Value;

use orchestrator::{
    services::{
        EchoContextStrategy, SeriesDataProcessor, SeriesMetricsCollector, StaticIdentity, SystemClock, ECHO_CONTEXT,
    },
    OrchestratorConfig, RevenueAnalytics, StrategyDispatcher, StrategyRegistry,
};
use shared::{component_debug, logging, Component, Payload};

/// Orchestrates pluggable monetization strategies
#[derive(Parser)]
#[command(name = "monetization")]
#[command(about = "Dispatch monetization strategies and analyze revenue trends")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error); overrides MONETIZATION_LOG_LEVEL
    #[arg(long)]
    pub log_level: Option<String>,

    /// System identity stamped into execution contexts; overrides MONETIZATION_SYSTEM_ID
    #[arg(long)]
    pub system_id: Option<String>,

    /// Env file to load instead of searching for .env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered strategy ids
    Strategies,

    /// Dispatch a strategy and print its result envelope
    Run {
        /// Strategy id
        strategy: String,

        /// JSON object merged into the execution context
        #[arg(long, default_value = "{}")]
        payload: String,

        /// Fail if the strategy takes longer than this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Analyze a JSON revenue file and print the analysis envelope
    Analyze {
        /// File containing {"revenue": [...]} or {"periods": [{"revenue": ...}, ...]}
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.env_file {
        Some(path) => OrchestratorConfig::from_env_file(path)?,
        None => OrchestratorConfig::from_env()?,
    };
    if let Some(level) = &args.log_level {
        config.set_log_level(level)?;
    }
    if let Some(system_id) = &args.system_id {
        config.set_system_id(system_id)?;
    }

    logging::init_tracing(Some(&config.log_level));
    logging::log_startup(Component::Cli, "monetization orchestrator");
    component_debug!(Component::Cli, system_id = %config.system_id, "Configuration loaded");

    let registry = Arc::new(StrategyRegistry::new());
    registry.register(ECHO_CONTEXT, EchoContextStrategy).await?;

    match args.command {
        Command::Strategies => {
            for id in registry.strategy_ids().await {
                println!("{id}");
            }
        }
        Command::Run {
            strategy,
            payload,
            timeout_ms,
        } => {
            let payload: Payload = shared::parse_payload(&payload).context("invalid --payload")?;
            let dispatcher = StrategyDispatcher::new(
                Arc::clone(&registry),
                SystemClock::new(),
                StaticIdentity::from_config(&config),
            );

            let timeout = timeout_ms.map(Duration::from_millis).or(config.dispatch_timeout);
            let outcome = match timeout {
                Some(limit) => dispatcher.execute_with_timeout(&strategy, payload, limit).await,
                None => dispatcher.execute(&strategy, payload).await,
            }
            .inspect_err(|err| logging::log_error(Component::Cli, "Strategy dispatch", err))?;

            logging::log_success(Component::Cli, &format!("Strategy {strategy} executed"));
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Analyze { input } => {
            let raw = std::fs::read_to_string(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let raw: Value = serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", input.display()))?;

            let analytics = RevenueAnalytics::new(SeriesDataProcessor, SeriesMetricsCollector);
            let outcome = analytics
                .analyze_trends(&raw)
                .await
                .inspect_err(|err| logging::log_error(Component::Cli, "Revenue analysis", err))?;

            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    logging::log_shutdown(Component::Cli, "command finished");
    Ok(())
}
