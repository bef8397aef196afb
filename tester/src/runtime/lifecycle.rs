//! Lifecycle Orchestrator
//!
//! `Idle -> Starting -> Polling -> (Verifying | Failed) -> TornDown`
//!
//! Teardown is owned by a [`TeardownGuard`] created before the first setup
//! command, so it runs exactly once on every path, including partial setup.

use super::cleanup::TeardownGuard;
use super::diagnostics::DiagnosticsCollector;
use super::poller::HealthPoller;
use super::probe::{CommandProbe, ResourceProbe};
use super::process::ProcessRunner;
use super::resource::{Resource, ResourceState};
use super::verifier::InferenceVerifier;
use crate::config::RunConfig;
use crate::error::{TesterError, TesterResult};
use crate::targets::ResourceTarget;
use crate::testing::{RunOutcome, RunReport};
use serde::{Deserialize, Serialize};
use shared::logging::{log_failure, log_progress, log_startup, log_success};
use shared::ModelName;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Idle,
    Starting,
    Polling,
    Verifying,
    Failed,
    TornDown,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub struct LifecycleOrchestrator {
    runner: Arc<dyn ProcessRunner>,
    config: RunConfig,
    poller: HealthPoller,
    diagnostics: DiagnosticsCollector,
    verifier: InferenceVerifier,
}

impl LifecycleOrchestrator {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: RunConfig) -> Self {
        Self {
            diagnostics: DiagnosticsCollector::new(runner.clone()),
            verifier: InferenceVerifier::new(runner.clone(), config.endpoint.clone()),
            poller: HealthPoller::new(),
            runner,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Full run using the target's own liveness and readiness probes
    pub async fn run(&self, target: &dyn ResourceTarget, models: &[ModelName]) -> RunReport {
        let probe = CommandProbe::new(
            self.runner.clone(),
            target.liveness(),
            target.readiness_command(&self.config.endpoint),
        );
        self.run_with_probe(target, &probe, models).await
    }

    /// Full run with an explicit probe
    pub async fn run_with_probe(
        &self,
        target: &dyn ResourceTarget,
        probe: &dyn ResourceProbe,
        models: &[ModelName],
    ) -> RunReport {
        let label = target.label();
        log_startup(target.resource_name(), &label);

        let guard = TeardownGuard::new(target.resource_name(), target.teardown_commands());
        let mut report = RunReport::new(label, Resource::new(target.resource_name()));

        let result = self.drive(target, probe, models, &mut report).await;

        match result {
            Ok(()) => {
                report.outcome = RunOutcome::Passed;
                log_success(report.resource.name(), &format!("{} passed", report.target));
            }
            Err(error) => {
                report.enter(LifecyclePhase::Failed);
                report.resource.transition(ResourceState::Failed);

                // Logs are gathered before the failure is handed back
                if error.wants_diagnostics() {
                    let diagnostics = self
                        .diagnostics
                        .collect(&report.resource, &target.log_command())
                        .await;
                    report.outcome = if diagnostics.collected {
                        RunOutcome::FailedWithDiagnostics
                    } else {
                        RunOutcome::FailedWithoutDiagnostics
                    };
                    report.diagnostics = Some(diagnostics);
                } else {
                    report.outcome = RunOutcome::FailedWithoutDiagnostics;
                }

                log_failure(report.resource.name(), &report.target, &error);
                report.error = Some(error);
            }
        }

        report.teardown_ok = guard.run(self.runner.as_ref()).await;
        report.resource.transition(ResourceState::Stopped);
        report.enter(LifecyclePhase::TornDown);
        report
    }

    async fn drive(
        &self,
        target: &dyn ResourceTarget,
        probe: &dyn ResourceProbe,
        models: &[ModelName],
        report: &mut RunReport,
    ) -> TesterResult<()> {
        for step in target.setup_steps() {
            log_progress(target.resource_name(), "setup", &step.command.to_string());
            let output = self.runner.run(&step.command).await;
            if output.success() {
                continue;
            }
            if step.required {
                return Err(TesterError::Setup {
                    command: step.command.to_string(),
                    code: output.exit_code,
                    stderr: output.stderr,
                });
            }
            tracing::warn!(
                "⚠️ Optional setup step `{}` exited with {}",
                step.command,
                output.exit_code
            );
        }
        report.enter(LifecyclePhase::Starting);

        report.enter(LifecyclePhase::Polling);
        let poll = self
            .poller
            .poll(&mut report.resource, probe, &self.config.budget)
            .await;
        report.attempts = poll.attempts;
        poll.result?;

        report.enter(LifecyclePhase::Verifying);
        self.verifier.check_tags(&report.resource).await?;

        for model in models {
            match self
                .verifier
                .verify(&report.resource, model, &self.config.prompt)
                .await
            {
                Ok(result) => report.verifications.push(result),
                Err(error) => {
                    if let Some(result) = error.verification() {
                        report.verifications.push(result.clone());
                    }
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
