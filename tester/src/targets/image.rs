//! Per-model image target: `docker build` + `docker run`

use super::{ResourceTarget, SetupStep};
use crate::runtime::probe::Liveness;
use crate::runtime::process::CommandSpec;
use shared::{ModelName, ResourceNames};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageTarget {
    model: ModelName,
    names: ResourceNames,
    build_context: PathBuf,
}

impl ImageTarget {
    pub fn new(model: ModelName, build_context: impl AsRef<Path>) -> Self {
        let names = ResourceNames::for_model(&model);
        Self::with_names(model, names, build_context)
    }

    pub fn with_names(model: ModelName, names: ResourceNames, build_context: impl AsRef<Path>) -> Self {
        Self {
            model,
            names,
            build_context: build_context.as_ref().to_path_buf(),
        }
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }
}

impl ResourceTarget for ImageTarget {
    fn label(&self) -> String {
        format!("image {}", self.model)
    }

    fn resource_name(&self) -> &str {
        &self.names.container
    }

    fn setup_steps(&self) -> Vec<SetupStep> {
        let build = CommandSpec::docker([
            "build".to_string(),
            "--build-arg".to_string(),
            format!("MODEL_NAME={}", self.model),
            "-t".to_string(),
            self.names.image_tag.clone(),
            self.build_context.to_string_lossy().to_string(),
        ])
        .streamed();

        let run = CommandSpec::docker([
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            self.names.container.clone(),
            "-v".to_string(),
            format!("{}:/root/.ollama", self.names.volume),
            "-e".to_string(),
            format!("BUILT_IN_OLLAMA_MODEL={}", self.model),
            self.names.image_tag.clone(),
        ]);

        vec![SetupStep::required(build), SetupStep::required(run)]
    }

    fn liveness(&self) -> Liveness {
        Liveness::HealthStatus
    }

    fn log_command(&self) -> CommandSpec {
        CommandSpec::docker(["logs", self.names.container.as_str()])
    }

    fn teardown_commands(&self) -> Vec<CommandSpec> {
        vec![
            CommandSpec::docker(["stop", self.names.container.as_str()]),
            CommandSpec::docker(["rm", "--force", self.names.container.as_str()]),
            CommandSpec::docker(["rmi", "--force", self.names.image_tag.as_str()]),
            CommandSpec::docker(["volume", "rm", "-f", self.names.volume.as_str()]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiEndpoint;

    fn target() -> ImageTarget {
        let model = ModelName::parse("tinyllama:1.1b").unwrap();
        let names = ResourceNames::with_suffix(&model, "beef");
        ImageTarget::with_names(model, names, "src")
    }

    #[test]
    fn test_setup_builds_then_runs() {
        let steps = target().setup_steps();
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.required));

        assert_eq!(
            steps[0].command.to_string(),
            "docker build --build-arg MODEL_NAME=tinyllama:1.1b -t test/ollama-ci:tinyllama-1.1b-v1-test src"
        );
        assert!(!steps[0].command.capture);

        assert_eq!(
            steps[1].command.to_string(),
            "docker run -d --name test-container-tinyllama-1.1b-v1-beef \
             -v test-container-tinyllama-1.1b-v1-beef-cache:/root/.ollama \
             -e BUILT_IN_OLLAMA_MODEL=tinyllama:1.1b test/ollama-ci:tinyllama-1.1b-v1-test"
        );
    }

    #[test]
    fn test_teardown_removes_container_image_and_volume() {
        let commands: Vec<String> = target()
            .teardown_commands()
            .iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            commands,
            vec![
                "docker stop test-container-tinyllama-1.1b-v1-beef",
                "docker rm --force test-container-tinyllama-1.1b-v1-beef",
                "docker rmi --force test/ollama-ci:tinyllama-1.1b-v1-test",
                "docker volume rm -f test-container-tinyllama-1.1b-v1-beef-cache",
            ]
        );
    }

    #[test]
    fn test_probes_and_logs() {
        let target = target();
        assert_eq!(target.liveness(), Liveness::HealthStatus);
        assert_eq!(
            target.readiness_command(&ApiEndpoint::default()).to_string(),
            "docker exec test-container-tinyllama-1.1b-v1-beef curl -sf http://localhost:11434/api/tags"
        );
        assert_eq!(
            target.log_command().to_string(),
            "docker logs test-container-tinyllama-1.1b-v1-beef"
        );
        assert_eq!(target.label(), "image tinyllama:1.1b");
    }
}
