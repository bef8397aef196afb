//! Core shared types and identifiers

use crate::errors::{SharedError, SharedResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Full ollama model identifier, e.g. `tinyllama:1.1b`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelName(String);

impl ModelName {
    pub fn parse(input: &str) -> SharedResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(SharedError::InvalidModel {
                input: input.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Docker-safe form of the identifier (`tinyllama:1.1b` -> `tinyllama-1.1b`)
    pub fn slug(&self) -> String {
        self.0.replace(':', "-")
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ModelName {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ModelName> for String {
    fn from(value: ModelName) -> Self {
        value.0
    }
}

/// Names of the docker objects created for one per-model run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    pub image_tag: String,
    pub container: String,
    pub volume: String,
}

impl ResourceNames {
    /// Derive names for a model; the container carries a random suffix so
    /// parallel runs of the same model do not collide.
    pub fn for_model(model: &ModelName) -> Self {
        Self::with_suffix(model, &short_suffix())
    }

    pub fn with_suffix(model: &ModelName, suffix: &str) -> Self {
        let slug = model.slug();
        let container = format!("test-container-{slug}-v1-{suffix}");
        Self {
            image_tag: format!("test/ollama-ci:{slug}-v1-test"),
            volume: format!("{container}-cache"),
            container,
        }
    }
}

/// First four hex characters of a fresh v4 uuid
pub fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..4].to_string()
}
