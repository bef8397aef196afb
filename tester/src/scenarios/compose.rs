//! Compose Scenarios
//!
//! The compose stacks shipped next to the image: one built locally, one
//! pulled from the registry.

use crate::runtime::LifecycleOrchestrator;
use crate::targets::compose::{ComposeTarget, BUILD_COMPOSE_FILE, PULL_COMPOSE_FILE};
use crate::testing::RunReport;
use shared::ModelName;

pub const BUILD_MODEL: &str = "tinyllama:1.1b";
pub const PULL_MODEL: &str = "qwen3:0.6b";

/// Compose stack built from the local Dockerfile
pub async fn build(orchestrator: &LifecycleOrchestrator) -> RunReport {
    tracing::info!("🧪 Compose build: {}", BUILD_COMPOSE_FILE);
    let target = ComposeTarget::new(BUILD_COMPOSE_FILE, true);
    run(orchestrator, &target, Some(BUILD_MODEL)).await
}

/// Compose stack using the published image
pub async fn pull(orchestrator: &LifecycleOrchestrator) -> RunReport {
    tracing::info!("🧪 Compose pull: {}", PULL_COMPOSE_FILE);
    let target = ComposeTarget::new(PULL_COMPOSE_FILE, false);
    run(orchestrator, &target, Some(PULL_MODEL)).await
}

/// Built stack, readiness and model listing only
pub async fn smoke(orchestrator: &LifecycleOrchestrator) -> RunReport {
    tracing::info!("🧪 Compose smoke: {}", BUILD_COMPOSE_FILE);
    let target = ComposeTarget::new(BUILD_COMPOSE_FILE, true);
    run(orchestrator, &target, None).await
}

/// Any compose file, verified against the given models
pub async fn custom(
    orchestrator: &LifecycleOrchestrator,
    target: &ComposeTarget,
    models: &[ModelName],
) -> RunReport {
    tracing::info!("🧪 Compose custom: {}", target.compose_file());
    orchestrator.run(target, models).await
}

async fn run(orchestrator: &LifecycleOrchestrator, target: &ComposeTarget, model: Option<&str>) -> RunReport {
    let models: Vec<ModelName> = model
        .and_then(|m| ModelName::parse(m).ok())
        .into_iter()
        .collect();
    orchestrator.run(target, &models).await
}
