//! Liveness and readiness probes
//!
//! Liveness asks "is the container still there", readiness asks "does the API
//! answer". They are independent: alive-but-not-ready is the normal state
//! while a model loads.

use super::process::{CommandSpec, ProcessOutput, ProcessRunner};
use std::sync::Arc;

/// Outcome of a single probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub ok: bool,
    pub raw_output: String,
}

impl ProbeOutcome {
    pub fn pass(raw_output: impl Into<String>) -> Self {
        Self {
            ok: true,
            raw_output: raw_output.into(),
        }
    }

    pub fn fail(raw_output: impl Into<String>) -> Self {
        Self {
            ok: false,
            raw_output: raw_output.into(),
        }
    }
}

#[mockall::automock]
#[async_trait::async_trait]
pub trait ResourceProbe: Send + Sync {
    /// Whether the resource still exists and is running
    async fn is_alive(&self, resource: &str) -> ProbeOutcome;

    /// Whether the resource answers application-level requests
    async fn is_ready(&self, resource: &str) -> ProbeOutcome;
}

/// How a target decides its container is still alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// `docker inspect` run state; the HEALTHCHECK status is only logged
    HealthStatus,
    /// `docker ps` filtered by exact container name
    ProcessListing,
}

impl Liveness {
    pub fn command(&self, resource: &str) -> CommandSpec {
        match self {
            Liveness::HealthStatus => CommandSpec::docker([
                "inspect",
                "--format",
                "{{.State.Status}}/{{if .State.Health}}{{.State.Health.Status}}{{end}}",
                resource,
            ]),
            Liveness::ProcessListing => {
                CommandSpec::docker(["ps", "-q", "-f", format!("name=^{resource}$").as_str()])
            }
        }
    }

    pub fn interpret(&self, output: &ProcessOutput) -> bool {
        if !output.success() {
            return false;
        }
        match self {
            Liveness::HealthStatus => {
                let status = output.stdout.trim();
                let (run_state, health) = status.split_once('/').unwrap_or((status, ""));
                if health == "unhealthy" {
                    tracing::debug!("🩺 HEALTHCHECK reports unhealthy, state {}", run_state);
                }
                matches!(run_state, "created" | "running" | "restarting")
            }
            Liveness::ProcessListing => !output.stdout.trim().is_empty(),
        }
    }
}

/// Probe that shells out through the process boundary
pub struct CommandProbe {
    runner: Arc<dyn ProcessRunner>,
    liveness: Liveness,
    readiness: CommandSpec,
}

impl CommandProbe {
    pub fn new(runner: Arc<dyn ProcessRunner>, liveness: Liveness, readiness: CommandSpec) -> Self {
        Self {
            runner,
            liveness,
            readiness,
        }
    }
}

#[async_trait::async_trait]
impl ResourceProbe for CommandProbe {
    async fn is_alive(&self, resource: &str) -> ProbeOutcome {
        let output = self.runner.run(&self.liveness.command(resource)).await;
        ProbeOutcome {
            ok: self.liveness.interpret(&output),
            raw_output: output.best_output().to_string(),
        }
    }

    async fn is_ready(&self, _resource: &str) -> ProbeOutcome {
        let output = self.runner.run(&self.readiness).await;
        ProbeOutcome {
            ok: output.success(),
            raw_output: output.best_output().to_string(),
        }
    }
}
