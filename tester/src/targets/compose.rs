//! Compose target: `docker compose up` with or without `--build`

use super::{ResourceTarget, SetupStep};
use crate::runtime::probe::Liveness;
use crate::runtime::process::CommandSpec;
use std::path::Path;

pub const BUILD_COMPOSE_FILE: &str = "docker-compose.test.yml";
pub const PULL_COMPOSE_FILE: &str = "docker-compose.pull-test.yml";

#[derive(Debug, Clone)]
pub struct ComposeTarget {
    compose_file: String,
    container: String,
    build: bool,
}

impl ComposeTarget {
    /// Target whose container name comes from the known compose files
    pub fn new<S: Into<String>>(compose_file: S, build: bool) -> Self {
        let compose_file = compose_file.into();
        let container = Self::container_for(&compose_file).to_string();
        Self::with_container(compose_file, container, build)
    }

    pub fn with_container<S: Into<String>, C: Into<String>>(compose_file: S, container: C, build: bool) -> Self {
        Self {
            compose_file: compose_file.into(),
            container: container.into(),
            build,
        }
    }

    /// Container name declared by the known compose files
    pub fn container_for(compose_file: &str) -> &'static str {
        let file_name = Path::new(compose_file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(compose_file);

        match file_name {
            BUILD_COMPOSE_FILE => "ollama-test-container",
            PULL_COMPOSE_FILE => "ollama-pull-test-container",
            _ => "unknown-container",
        }
    }

    pub fn compose_file(&self) -> &str {
        &self.compose_file
    }

    pub fn builds(&self) -> bool {
        self.build
    }

    fn compose<'a>(&'a self, args: &[&'a str]) -> CommandSpec {
        let mut full = vec!["compose", "-f", self.compose_file.as_str()];
        full.extend_from_slice(args);
        CommandSpec::docker(full)
    }
}

impl ResourceTarget for ComposeTarget {
    fn label(&self) -> String {
        let mode = if self.build { "build" } else { "pull" };
        format!("compose {} ({})", self.compose_file, mode)
    }

    fn resource_name(&self) -> &str {
        &self.container
    }

    fn setup_steps(&self) -> Vec<SetupStep> {
        let mut up_args = vec!["up", "-d"];
        if self.build {
            up_args.push("--build");
        }

        vec![
            // Leftovers from an interrupted run
            SetupStep::optional(self.compose(&["down", "-v"]).streamed()),
            SetupStep::required(self.compose(&up_args).streamed()),
        ]
    }

    fn liveness(&self) -> Liveness {
        Liveness::ProcessListing
    }

    fn log_command(&self) -> CommandSpec {
        self.compose(&["logs"])
    }

    fn teardown_commands(&self) -> Vec<CommandSpec> {
        vec![self.compose(&["down", "-v"])]
    }
}
