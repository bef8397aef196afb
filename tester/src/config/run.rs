//! Run Configuration
//!
//! Poll budget, API endpoint and inference prompt shared by every run.

use crate::error::{TesterError, TesterResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROMPT: &str = "Why is the sky blue?";

/// Attempt-count/interval pair bounding the readiness loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    max_attempts: u32,
    interval: Duration,
}

impl Budget {
    pub fn new(max_attempts: u32, interval: Duration) -> TesterResult<Self> {
        if max_attempts == 0 {
            return Err(TesterError::InvalidConfig {
                field: "max_attempts".to_string(),
                value: max_attempts.to_string(),
            });
        }
        if interval.is_zero() {
            return Err(TesterError::InvalidConfig {
                field: "interval".to_string(),
                value: format!("{interval:?}"),
            });
        }
        Ok(Self {
            max_attempts,
            interval,
        })
    }

    pub fn from_secs(max_attempts: u32, interval_secs: u64) -> TesterResult<Self> {
        Self::new(max_attempts, Duration::from_secs(interval_secs))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn total_timeout(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for Budget {
    /// 90 attempts, 10 seconds apart: 15 minutes for the model to load
    fn default() -> Self {
        Self {
            max_attempts: 90,
            interval: Duration::from_secs(10),
        }
    }
}

/// Base URL of the ollama API as seen from inside the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    base_url: String,
}

impl ApiEndpoint {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self::new("http://localhost:11434")
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub budget: Budget,
    pub endpoint: ApiEndpoint,
    pub prompt: String,
    pub manifest_path: PathBuf,
    pub build_context: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            endpoint: ApiEndpoint::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            manifest_path: PathBuf::from(shared::DEFAULT_MANIFEST_PATH),
            build_context: PathBuf::from("src"),
        }
    }
}

impl RunConfig {
    /// Create a new builder
    pub fn builder() -> crate::config::builder::RunConfigBuilder {
        crate::config::builder::RunConfigBuilder::new()
    }
}
