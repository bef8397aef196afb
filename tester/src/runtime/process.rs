//! Process execution boundary
//!
//! Docker, compose and curl are reached only through [`ProcessRunner`]. A
//! non-zero exit code is the sole failure signal; a spawn failure is folded
//! into the same shape (exit code -1, OS error in stderr).

use std::fmt;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// One external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Pipe and return stdout/stderr; when false they stream to the terminal
    pub capture: bool,
}

impl CommandSpec {
    /// Captured command; the usual case
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            capture: true,
        }
    }

    /// Shorthand for `docker <args>`
    pub fn docker<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("docker", args)
    }

    /// Let output stream to the terminal (long builds)
    pub fn streamed(mut self) -> Self {
        self.capture = false;
        self
    }

    /// Whether the argument list starts with the given words
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.args.len() && prefix.iter().zip(&self.args).all(|(p, a)| p == a)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of one command execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code (0 = success, -1 = killed by signal or never started)
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// Stdout, or stderr when stdout is empty
    pub fn best_output(&self) -> &str {
        if self.stdout.trim().is_empty() {
            self.stderr.trim()
        } else {
            self.stdout.trim()
        }
    }
}

#[mockall::automock]
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion
    async fn run(&self, command: &CommandSpec) -> ProcessOutput;
}

/// Real runner backed by tokio child processes
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &CommandSpec) -> ProcessOutput {
        let start = Instant::now();
        tracing::debug!("▶️ {}", command);

        let mut cmd = Command::new(&command.program);
        // Ctrl+C drops this future; a long `docker build` must not outlive it
        cmd.args(&command.args).stdin(Stdio::null()).kill_on_drop(true);
        if command.capture {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("⚠️ Failed to spawn `{}`: {}", command, e);
                return ProcessOutput {
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: format!("failed to spawn {}: {e}", command.program),
                    duration_ms: start.elapsed().as_millis() as u64,
                };
            }
        };

        let result = ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::debug!(
            "⏹️ `{}` exited with {} after {}ms",
            command,
            result.exit_code,
            result.duration_ms
        );
        result
    }
}
