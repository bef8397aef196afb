//! Inference Verifier
//!
//! Sends one generate request through `docker exec ... curl` and checks the
//! body is JSON carrying a `response` field. Exactly one attempt; retrying is
//! the caller's business.

use super::process::{CommandSpec, ProcessRunner};
use super::resource::Resource;
use crate::config::ApiEndpoint;
use crate::error::{TesterError, TesterResult};
use serde::{Deserialize, Serialize};
use shared::ModelName;
use std::sync::Arc;

pub const RESPONSE_FIELD: &str = "response";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub model_identifier: String,
    pub http_ok: bool,
    pub parsed_successfully: bool,
    pub has_expected_field: bool,
    pub raw_body: String,
}

impl VerificationResult {
    fn new(model: &ModelName) -> Self {
        Self {
            model_identifier: model.to_string(),
            http_ok: false,
            parsed_successfully: false,
            has_expected_field: false,
            raw_body: String::new(),
        }
    }

    /// No partial credit
    pub fn passed(&self) -> bool {
        self.http_ok && self.parsed_successfully && self.has_expected_field
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

pub struct InferenceVerifier {
    runner: Arc<dyn ProcessRunner>,
    endpoint: ApiEndpoint,
}

impl InferenceVerifier {
    pub fn new(runner: Arc<dyn ProcessRunner>, endpoint: ApiEndpoint) -> Self {
        Self { runner, endpoint }
    }

    /// Confirm the model listing endpoint answers
    pub async fn check_tags(&self, resource: &Resource) -> TesterResult<()> {
        let command = CommandSpec::docker([
            "exec",
            resource.name(),
            "curl",
            "-s",
            self.endpoint.tags_url().as_str(),
        ]);
        let output = self.runner.run(&command).await;

        if !output.success() {
            return Err(TesterError::ApiUnavailable {
                resource: resource.name().to_string(),
                stderr: output.stderr,
            });
        }

        tracing::debug!("🏷️ {} tags: {}", resource.name(), output.stdout.trim());
        Ok(())
    }

    pub async fn verify(
        &self,
        resource: &Resource,
        model: &ModelName,
        prompt: &str,
    ) -> TesterResult<VerificationResult> {
        tracing::info!("🧠 Verifying model inference for {}...", model);

        let body = serde_json::to_string(&GenerateRequest {
            model: model.as_str(),
            prompt,
            stream: false,
        })?;

        let command = CommandSpec::docker([
            "exec",
            resource.name(),
            "curl",
            "-s",
            self.endpoint.generate_url().as_str(),
            "-d",
            body.as_str(),
        ]);
        let output = self.runner.run(&command).await;

        let mut result = VerificationResult::new(model);
        result.raw_body = output.stdout.clone();

        if !output.success() {
            return Err(TesterError::Transport {
                result,
                stderr: output.stderr,
            });
        }
        result.http_ok = true;

        let parsed: serde_json::Value = match serde_json::from_str(&output.stdout) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Response for {} is not JSON: {}", model, e);
                return Err(TesterError::MalformedResponse { result });
            }
        };
        result.parsed_successfully = true;

        result.has_expected_field = parsed
            .as_object()
            .is_some_and(|body| body.contains_key(RESPONSE_FIELD));
        if !result.has_expected_field {
            return Err(TesterError::MalformedResponse { result });
        }

        tracing::info!("✅ Inference successful for model {}", model);
        Ok(result)
    }
}
