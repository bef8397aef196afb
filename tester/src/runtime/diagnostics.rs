//! Diagnostics Collector
//!
//! Best-effort log capture after a terminal polling failure. Collection never
//! fails: anything that goes wrong yields the `No logs` sentinel so the
//! original error stays the one that is reported.

use super::process::{CommandSpec, ProcessRunner};
use super::resource::Resource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NO_LOGS: &str = "No logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub resource: String,
    /// The command the logs came from
    pub source: String,
    pub logs: String,
    pub collected: bool,
}

impl DiagnosticsReport {
    pub fn unavailable(resource: &str, source: &str) -> Self {
        Self {
            resource: resource.to_string(),
            source: source.to_string(),
            logs: NO_LOGS.to_string(),
            collected: false,
        }
    }
}

pub struct DiagnosticsCollector {
    runner: Arc<dyn ProcessRunner>,
}

impl DiagnosticsCollector {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub async fn collect(&self, resource: &Resource, log_command: &CommandSpec) -> DiagnosticsReport {
        let source = log_command.to_string();
        tracing::info!("📜 Collecting logs for {} via `{}`", resource.name(), source);

        let mut command = log_command.clone();
        command.capture = true;
        let output = self.runner.run(&command).await;

        if !output.success() {
            tracing::warn!(
                "⚠️ Log collection for {} failed (exit {}): {}",
                resource.name(),
                output.exit_code,
                output.stderr.trim()
            );
            return DiagnosticsReport::unavailable(resource.name(), &source);
        }

        DiagnosticsReport {
            resource: resource.name().to_string(),
            source,
            logs: output.stdout,
            collected: true,
        }
    }
}
