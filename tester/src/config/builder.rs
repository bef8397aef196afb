//! Run Configuration Builder
//!
//! Provides a builder pattern for constructing run configurations

use super::{ApiEndpoint, Budget, RunConfig};
use std::path::PathBuf;

pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
        }
    }

    /// Set the readiness poll budget
    pub fn budget(mut self, budget: Budget) -> Self {
        self.config.budget = budget;
        self
    }

    /// Set the API base URL used inside the container
    pub fn api_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.endpoint = ApiEndpoint::new(url);
        self
    }

    /// Set the inference prompt
    pub fn prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    /// Set the models manifest location
    pub fn manifest_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.manifest_path = path.into();
        self
    }

    /// Set the docker build context for per-model images
    pub fn build_context<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.build_context = path.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> RunConfig {
        self.config
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
