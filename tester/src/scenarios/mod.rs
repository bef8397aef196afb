//! Test Scenarios
//!
//! Named runs selectable from the command line

pub mod compose;
pub mod models;

use crate::error::{TesterError, TesterResult};
use crate::runtime::LifecycleOrchestrator;
use crate::targets::ComposeTarget;
use crate::testing::RunSummary;
use shared::{ModelManifest, ModelName};

pub struct TestScenarios {
    orchestrator: LifecycleOrchestrator,
    models: Option<Vec<ModelName>>,
    compose_target: Option<ComposeTarget>,
}

impl TestScenarios {
    pub fn new(orchestrator: LifecycleOrchestrator) -> Self {
        Self {
            orchestrator,
            models: None,
            compose_target: None,
        }
    }

    /// Use these models instead of the manifest
    pub fn with_models(mut self, models: Vec<ModelName>) -> Self {
        if !models.is_empty() {
            self.models = Some(models);
        }
        self
    }

    /// Compose file for the `compose_custom` scenario
    pub fn with_compose_target(mut self, target: ComposeTarget) -> Self {
        self.compose_target = Some(target);
        self
    }

    /// Run a specific scenario by name
    pub async fn run_scenario(&self, name: &str) -> TesterResult<RunSummary> {
        let orchestrator = &self.orchestrator;
        let mut summary = RunSummary::new();

        match name {
            "models" => {
                let models = self.resolve_models()?;
                summary.extend(models::all(orchestrator, &models).await);
            }
            "compose_build" => summary.push(compose::build(orchestrator).await),
            "compose_pull" => summary.push(compose::pull(orchestrator).await),
            "compose_smoke" => summary.push(compose::smoke(orchestrator).await),
            "compose_custom" => {
                let target = self.compose_target.as_ref().ok_or_else(|| TesterError::InvalidConfig {
                    field: "compose_file".to_string(),
                    value: "<unset>".to_string(),
                })?;
                let models = self.models.clone().unwrap_or_default();
                summary.push(compose::custom(orchestrator, target, &models).await);
            }

            "compose" => {
                summary.push(compose::build(orchestrator).await);
                summary.push(compose::pull(orchestrator).await);
            }

            "all" => {
                tracing::info!("🧪 Running full image test suite");
                let models = self.resolve_models()?;
                summary.extend(models::all(orchestrator, &models).await);
                summary.push(compose::build(orchestrator).await);
                summary.push(compose::pull(orchestrator).await);
            }

            _ => {
                return Err(TesterError::UnknownScenario {
                    name: name.to_string(),
                    available: Self::available_scenarios().join(", "),
                })
            }
        }

        Ok(summary)
    }

    /// Get list of available scenarios
    pub fn available_scenarios() -> Vec<&'static str> {
        vec![
            "models",
            "compose_build", "compose_pull", "compose_smoke", "compose_custom",
            // Suites
            "compose",
            "all",
        ]
    }

    fn resolve_models(&self) -> TesterResult<Vec<ModelName>> {
        if let Some(models) = &self.models {
            return Ok(models.clone());
        }
        let manifest = ModelManifest::load(&self.orchestrator.config().manifest_path)?;
        Ok(manifest.model_names())
    }
}
