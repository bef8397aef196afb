//! Tester error taxonomy
//!
//! Every variant is terminal for the current run. Retrying, if wanted, wraps
//! the whole lifecycle.

use crate::runtime::resource::ResourceState;
use crate::runtime::verifier::VerificationResult;
use shared::SharedError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesterError {
    #[error("Resource setup failed: `{command}` exited with code {code}\nStderr: {stderr}")]
    Setup {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Container {resource} stopped unexpectedly (attempt {attempt})")]
    ResourceDied { resource: String, attempt: u32 },

    #[error("Container {resource} did not become healthy in {} seconds", total_timeout.as_secs())]
    Timeout {
        resource: String,
        total_timeout: Duration,
        elapsed: Duration,
    },

    #[error("Inference API call failed for model {}.\nStderr: {stderr}", result.model_identifier)]
    Transport {
        result: VerificationResult,
        stderr: String,
    },

    #[error("Inference response is invalid for model {}.\nStdout: {}", result.model_identifier, result.raw_body)]
    MalformedResponse { result: VerificationResult },

    #[error("API call failed for {resource}: {stderr}")]
    ApiUnavailable { resource: String, stderr: String },

    #[error("Resource {resource} is {state}, expected {expected}")]
    InvalidState {
        resource: String,
        state: ResourceState,
        expected: ResourceState,
    },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown scenario '{name}'. Available: {available}")]
    UnknownScenario { name: String, available: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TesterError {
    /// The verification outcome carried by inference failures
    pub fn verification(&self) -> Option<&VerificationResult> {
        match self {
            TesterError::Transport { result, .. } | TesterError::MalformedResponse { result } => {
                Some(result)
            }
            _ => None,
        }
    }

    /// Whether diagnostics should be collected for this failure
    pub fn wants_diagnostics(&self) -> bool {
        matches!(
            self,
            TesterError::ResourceDied { .. } | TesterError::Timeout { .. }
        )
    }
}

pub type TesterResult<T> = Result<T, TesterError>;
