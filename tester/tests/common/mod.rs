//! Shared fixtures for tester integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use shared::{ModelName, ResourceNames};
use tester::{Budget, CommandSpec, ImageTarget, ProcessOutput, ProcessRunner, RunConfig};

pub const CONTAINER: &str = "test-container-tinyllama-1.1b-v1-beef";
pub const TAGS_URL: &str = "http://localhost:11434/api/tags";
pub const GENERATE_URL: &str = "http://localhost:11434/api/generate";

struct Rule {
    prefix: Vec<String>,
    responses: VecDeque<ProcessOutput>,
}

/// Fake process boundary: answers by argument prefix and records every call.
///
/// The first matching rule wins. A rule's responses are consumed in order and
/// the last one repeats. Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, prefix: &[&str], output: ProcessOutput) -> Self {
        self.on_sequence(prefix, vec![output])
    }

    pub fn on_sequence(self, prefix: &[&str], outputs: Vec<ProcessOutput>) -> Self {
        assert!(!outputs.is_empty());
        self.rules.lock().unwrap().push(Rule {
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            responses: outputs.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls whose arguments start with `prefix`
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .count()
    }

    /// Index of the first recorded call starting with `prefix`
    pub fn position(&self, prefix: &[&str]) -> Option<usize> {
        self.calls().iter().position(|cmd| cmd.starts_with(prefix))
    }
}

#[async_trait::async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> ProcessOutput {
        self.calls.lock().unwrap().push(command.clone());

        let mut rules = self.rules.lock().unwrap();
        for rule in rules.iter_mut() {
            let prefix: Vec<&str> = rule.prefix.iter().map(String::as_str).collect();
            if command.starts_with(&prefix) {
                return if rule.responses.len() > 1 {
                    rule.responses.pop_front().unwrap()
                } else {
                    rule.responses.front().cloned().unwrap()
                };
            }
        }
        ProcessOutput::ok("")
    }
}

pub fn tinyllama() -> ModelName {
    ModelName::parse("tinyllama:1.1b").unwrap()
}

pub fn image_target() -> ImageTarget {
    let model = tinyllama();
    let names = ResourceNames::with_suffix(&model, "beef");
    ImageTarget::with_names(model, names, "src")
}

/// Three attempts, one second apart
pub fn fast_config() -> RunConfig {
    RunConfig::builder()
        .budget(Budget::new(3, Duration::from_secs(1)).unwrap())
        .build()
}

pub fn not_ready() -> ProcessOutput {
    ProcessOutput::failed(7, "curl: (7) Failed to connect to localhost port 11434")
}
