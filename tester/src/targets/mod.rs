//! Resource Targets
//!
//! A target knows how to create, probe, inspect and remove one container
//! resource. The lifecycle drives it without knowing whether it is a single
//! `docker run` or a compose project.

pub mod compose;
pub mod image;

pub use compose::ComposeTarget;
pub use image::ImageTarget;

use crate::config::ApiEndpoint;
use crate::runtime::probe::Liveness;
use crate::runtime::process::CommandSpec;

/// One setup command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub command: CommandSpec,
    /// A failing required step aborts the run; optional steps are best effort
    pub required: bool,
}

impl SetupStep {
    pub fn required(command: CommandSpec) -> Self {
        Self {
            command,
            required: true,
        }
    }

    pub fn optional(command: CommandSpec) -> Self {
        Self {
            command,
            required: false,
        }
    }
}

pub trait ResourceTarget: Send + Sync {
    /// Human-readable label for reports
    fn label(&self) -> String;

    /// Container name probed and exec'd into
    fn resource_name(&self) -> &str;

    fn setup_steps(&self) -> Vec<SetupStep>;

    fn liveness(&self) -> Liveness;

    fn readiness_command(&self, endpoint: &ApiEndpoint) -> CommandSpec {
        CommandSpec::docker([
            "exec",
            self.resource_name(),
            "curl",
            "-sf",
            endpoint.tags_url().as_str(),
        ])
    }

    fn log_command(&self) -> CommandSpec;

    fn teardown_commands(&self) -> Vec<CommandSpec>;
}
