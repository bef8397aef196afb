//! Teardown Guard
//!
//! Owns the teardown commands of one resource and runs them exactly once.
//! The normal path awaits [`TeardownGuard::run`]; if the run future is dropped
//! before every command completed (Ctrl+C, panic) the guard's `Drop` runs the
//! commands still outstanding with blocking `std::process` calls.

use super::process::{CommandSpec, ProcessRunner};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

pub struct TeardownGuard {
    resource: String,
    commands: Vec<CommandSpec>,
    /// Index of the first command that has not completed
    next: usize,
}

impl TeardownGuard {
    pub fn new<S: Into<String>>(resource: S, commands: Vec<CommandSpec>) -> Self {
        Self {
            resource: resource.into(),
            commands,
            next: 0,
        }
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Commands not yet run to completion
    pub fn remaining(&self) -> &[CommandSpec] {
        &self.commands[self.next..]
    }

    /// Run every teardown command, best effort. Returns whether all succeeded.
    pub async fn run(mut self, runner: &dyn ProcessRunner) -> bool {
        info!("🧹 Tearing down {}", self.resource);

        let mut all_ok = true;
        while self.next < self.commands.len() {
            let command = &self.commands[self.next];
            let output = runner.run(command).await;
            if output.success() {
                debug!("🧹 `{}` ok", command);
            } else {
                all_ok = false;
                warn!(
                    "⚠️ Teardown step `{}` failed (exit {}): {}",
                    command,
                    output.exit_code,
                    output.stderr.trim()
                );
            }
            self.next += 1;
        }

        if all_ok {
            info!("✅ Teardown of {} complete", self.resource);
        }
        all_ok
    }

    fn emergency_teardown(&self) {
        warn!("🚨 Emergency cleanup: tearing down {}", self.resource);
        for command in self.remaining() {
            let status = Command::new(&command.program)
                .args(&command.args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if let Err(e) = status {
                warn!("⚠️ Emergency teardown `{}` failed: {}", command, e);
            }
        }
    }
}

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        if !self.remaining().is_empty() {
            self.emergency_teardown();
            self.next = self.commands.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::process::{MockProcessRunner, ProcessOutput};
    use std::time::Duration;

    /// Never finishes `true`, like a `docker stop` waiting on its grace period
    struct StallingRunner;

    #[async_trait::async_trait]
    impl ProcessRunner for StallingRunner {
        async fn run(&self, command: &CommandSpec) -> ProcessOutput {
            if command.program == "true" {
                std::future::pending::<()>().await;
            }
            ProcessOutput::ok("")
        }
    }

    #[tokio::test]
    async fn test_runs_every_command_even_after_failure() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd| cmd.starts_with(&["stop"]))
            .times(1)
            .returning(|_| ProcessOutput::failed(1, "No such container"));
        runner
            .expect_run()
            .withf(|cmd| cmd.starts_with(&["rm", "--force"]))
            .times(1)
            .returning(|_| ProcessOutput::ok(""));

        let guard = TeardownGuard::new(
            "c1",
            vec![
                CommandSpec::docker(["stop", "c1"]),
                CommandSpec::docker(["rm", "--force", "c1"]),
            ],
        );

        assert!(!guard.run(&runner).await);
    }

    #[tokio::test]
    async fn test_successful_teardown() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| ProcessOutput::ok(""));

        let guard = TeardownGuard::new("c1", vec![CommandSpec::docker(["compose", "down", "-v"])]);
        assert_eq!(guard.commands().len(), 1);
        assert!(guard.run(&runner).await);
    }

    #[test]
    fn test_drop_runs_emergency_teardown() {
        let marker = tempfile::NamedTempFile::new().unwrap();
        let path = marker.path().to_path_buf();
        std::fs::remove_file(&path).unwrap();

        {
            let _guard = TeardownGuard::new(
                "c1",
                vec![CommandSpec::new("touch", [path.to_string_lossy().to_string()])],
            );
        }

        assert!(path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_run_finishes_outstanding_commands() {
        let marker = tempfile::NamedTempFile::new().unwrap();
        let path = marker.path().to_path_buf();
        std::fs::remove_file(&path).unwrap();

        let guard = TeardownGuard::new(
            "c1",
            vec![
                CommandSpec::new("true", ["stop"]),
                CommandSpec::new("touch", [path.to_string_lossy().to_string()]),
            ],
        );

        let interrupted = tokio::time::timeout(Duration::from_millis(50), guard.run(&StallingRunner)).await;

        assert!(interrupted.is_err());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_completed_run_disarms_drop() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(2).returning(|_| ProcessOutput::ok(""));

        let marker = tempfile::NamedTempFile::new().unwrap();
        let path = marker.path().to_path_buf();
        std::fs::remove_file(&path).unwrap();

        // The mock never creates the file, only an emergency teardown would
        let guard = TeardownGuard::new(
            "c1",
            vec![
                CommandSpec::docker(["stop", "c1"]),
                CommandSpec::new("touch", [path.to_string_lossy().to_string()]),
            ],
        );

        assert!(guard.run(&runner).await);
        assert!(!path.exists());
    }
}
