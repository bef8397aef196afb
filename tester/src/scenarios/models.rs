//! Per-model image scenarios
//!
//! One independent build/run/verify/teardown cycle per manifest entry.

use crate::runtime::LifecycleOrchestrator;
use crate::targets::ImageTarget;
use crate::testing::{RunReport, RunSummary};
use shared::ModelName;

/// Build and verify one image per model
pub async fn all(orchestrator: &LifecycleOrchestrator, models: &[ModelName]) -> RunSummary {
    tracing::info!("🧪 Models: {} image(s) to verify", models.len());

    let mut summary = RunSummary::new();
    for model in models {
        summary.push(single(orchestrator, model).await);
    }
    summary
}

/// Build and verify the image for a single model
pub async fn single(orchestrator: &LifecycleOrchestrator, model: &ModelName) -> RunReport {
    let target = ImageTarget::new(model.clone(), &orchestrator.config().build_context);
    orchestrator.run(&target, std::slice::from_ref(model)).await
}
