//! Image Test Runner
//!
//! Builds or pulls the ollama image, waits for the API, verifies inference
//! and tears everything down. Exits non-zero if any run failed.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use shared::ModelName;
use tester::{Budget, ComposeTarget, LifecycleOrchestrator, RunConfig, TestScenarios, TokioProcessRunner};

#[derive(Parser)]
#[command(name = "tester")]
#[command(about = "Readiness and inference checks for ollama container images")]
struct Args {
    /// Test scenario to run
    #[arg(long, default_value = "models")]
    scenario: String,

    /// Models manifest enumerated by the `models` scenario
    #[arg(long, default_value = shared::DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,

    /// Docker build context for per-model images
    #[arg(long, default_value = "src")]
    context: PathBuf,

    /// Model to verify instead of the manifest entries (repeatable)
    #[arg(long = "model")]
    models: Vec<String>,

    /// Compose file for the `compose_custom` scenario
    #[arg(long)]
    compose_file: Option<String>,

    /// Container name inside the compose file (defaults by file name)
    #[arg(long)]
    container: Option<String>,

    /// Build the compose stack instead of pulling it
    #[arg(long)]
    build: bool,

    /// Readiness attempts before giving up
    #[arg(long, default_value = "90")]
    max_attempts: u32,

    /// Seconds to wait before each readiness attempt
    #[arg(long, default_value = "10")]
    interval_secs: u64,

    /// Prompt sent to each model
    #[arg(long, default_value = tester::config::DEFAULT_PROMPT)]
    prompt: String,

    /// ollama API base URL as seen from inside the container
    #[arg(long, default_value = "http://localhost:11434")]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose tracing output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    shared::logging::init_tracing(args.log_level.as_deref(), args.verbose);

    tracing::info!("🧪 Starting image test runner");
    tracing::info!(
        "Scenario: {}, budget: {} x {}s",
        args.scenario,
        args.max_attempts,
        args.interval_secs
    );

    let config = RunConfig::builder()
        .budget(Budget::from_secs(args.max_attempts, args.interval_secs)?)
        .api_url(args.api_url.clone())
        .prompt(args.prompt.clone())
        .manifest_path(args.manifest.clone())
        .build_context(args.context.clone())
        .build();

    let models = args
        .models
        .iter()
        .map(|m| ModelName::parse(m))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --model value")?;

    let orchestrator = LifecycleOrchestrator::new(Arc::new(TokioProcessRunner::new()), config);
    let mut scenarios = TestScenarios::new(orchestrator).with_models(models);
    if let Some(file) = &args.compose_file {
        let target = match &args.container {
            Some(container) => ComposeTarget::with_container(file.clone(), container.clone(), args.build),
            None => ComposeTarget::new(file.clone(), args.build),
        };
        scenarios = scenarios.with_compose_target(target);
    }

    // Dropping the scenario future on Ctrl+C triggers emergency teardown
    let summary = tokio::select! {
        result = scenarios.run_scenario(&args.scenario) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("🛑 Interrupted, cleaning up");
            anyhow::bail!("interrupted");
        }
    };

    println!("{}", summary.render());

    if !summary.all_passed() {
        anyhow::bail!(
            "scenario '{}': {} of {} run(s) failed",
            args.scenario,
            summary.failed(),
            summary.reports.len()
        );
    }

    tracing::info!("🏁 Image testing completed");
    Ok(())
}
