//! Run report and scenario summary

use crate::error::TesterError;
use crate::runtime::diagnostics::DiagnosticsReport;
use crate::runtime::lifecycle::LifecyclePhase;
use crate::runtime::poller::PollAttempt;
use crate::runtime::resource::Resource;
use crate::runtime::verifier::VerificationResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Passed,
    FailedWithDiagnostics,
    FailedWithoutDiagnostics,
}

#[derive(Debug)]
pub struct RunReport {
    pub target: String,
    pub resource: Resource,
    pub phases: Vec<LifecyclePhase>,
    pub outcome: RunOutcome,
    pub error: Option<TesterError>,
    pub diagnostics: Option<DiagnosticsReport>,
    pub attempts: Vec<PollAttempt>,
    pub verifications: Vec<VerificationResult>,
    pub teardown_ok: bool,
}

impl RunReport {
    pub fn new(target: String, resource: Resource) -> Self {
        Self {
            target,
            resource,
            phases: vec![LifecyclePhase::Idle],
            outcome: RunOutcome::FailedWithoutDiagnostics,
            error: None,
            diagnostics: None,
            attempts: Vec::new(),
            verifications: Vec::new(),
            teardown_ok: false,
        }
    }

    pub(crate) fn enter(&mut self, phase: LifecyclePhase) {
        tracing::debug!("🔀 {}: {}", self.target, phase);
        self.phases.push(phase);
    }

    pub fn passed(&self) -> bool {
        self.outcome == RunOutcome::Passed
    }

    /// Whether the run ever reached the given phase
    pub fn reached(&self, phase: LifecyclePhase) -> bool {
        self.phases.contains(&phase)
    }

    /// Error message plus captured logs, as shown to the user
    pub fn failure_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        let mut message = error.to_string();
        if let Some(diagnostics) = &self.diagnostics {
            let _ = write!(message, "\nLogs:\n{}", diagnostics.logs);
        }
        Some(message)
    }
}

/// Aggregate of every run in a scenario
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<RunReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: RunReport) {
        self.reports.push(report);
    }

    pub fn extend(&mut self, other: RunSummary) {
        self.reports.extend(other.reports);
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        !self.reports.is_empty() && self.failed() == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for report in &self.reports {
            if report.passed() {
                let _ = writeln!(out, "✅ {}", report.target);
            } else {
                let message = report
                    .failure_message()
                    .unwrap_or_else(|| "run did not complete".to_string());
                let _ = writeln!(out, "❌ {}: {}", report.target, message);
            }
            if !report.teardown_ok {
                let _ = writeln!(out, "   ⚠️ teardown of {} was incomplete", report.resource.name());
            }
        }
        let _ = write!(
            out,
            "🏁 {} passed, {} failed",
            self.passed(),
            self.failed()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::diagnostics::NO_LOGS;
    use std::time::Duration;

    fn passed_report(target: &str) -> RunReport {
        let mut report = RunReport::new(target.to_string(), Resource::new("c1"));
        report.outcome = RunOutcome::Passed;
        report.teardown_ok = true;
        report
    }

    #[test]
    fn test_failure_message_includes_logs() {
        let mut report = RunReport::new("compose".to_string(), Resource::new("c1"));
        report.error = Some(TesterError::Timeout {
            resource: "c1".to_string(),
            total_timeout: Duration::from_secs(900),
            elapsed: Duration::from_secs(900),
        });
        report.diagnostics = Some(DiagnosticsReport::unavailable("c1", "docker logs c1"));

        let message = report.failure_message().unwrap();
        assert!(message.contains("did not become healthy in 900 seconds"));
        assert!(message.ends_with(&format!("Logs:\n{NO_LOGS}")));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new();
        assert!(!summary.all_passed());

        summary.push(passed_report("image tinyllama:1.1b"));
        assert!(summary.all_passed());

        summary.push(RunReport::new("image qwen3:0.6b".to_string(), Resource::new("c2")));
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failed(), 1);

        let rendered = summary.render();
        assert!(rendered.contains("✅ image tinyllama:1.1b"));
        assert!(rendered.contains("teardown of c2 was incomplete"));
        assert!(rendered.ends_with("1 passed, 1 failed"));
    }
}
