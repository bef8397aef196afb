//! Models manifest
//!
//! The image build reads the same `models.json` the harness enumerates:
//!
//! ```json
//! { "models": { "tinyllama": { "name": "tinyllama:1.1b" } } }
//! ```
//!
//! Keys are arbitrary; each entry must carry the full model identifier in
//! `name`. Any other fields are preserved untouched.

use crate::errors::{SharedError, SharedResult};
use crate::types::ModelName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_MANIFEST_PATH: &str = "src/models.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: ModelName,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub models: BTreeMap<String, ModelEntry>,
}

impl ModelManifest {
    pub fn load(path: impl AsRef<Path>) -> SharedResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| SharedError::ManifestRead {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        let manifest = Self::from_json(&content).map_err(|e| match e {
            SharedError::ManifestParse { message, .. } => SharedError::ManifestParse {
                path: shown.clone(),
                message,
            },
            SharedError::EmptyManifest { .. } => SharedError::EmptyManifest {
                path: shown.clone(),
            },
            other => other,
        })?;

        tracing::debug!("📋 Loaded {} models from {}", manifest.models.len(), shown);
        Ok(manifest)
    }

    pub fn from_json(content: &str) -> SharedResult<Self> {
        let manifest: Self =
            serde_json::from_str(content).map_err(|e| SharedError::ManifestParse {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        if manifest.models.is_empty() {
            return Err(SharedError::EmptyManifest {
                path: "<inline>".to_string(),
            });
        }

        Ok(manifest)
    }

    /// Model identifiers in manifest key order
    pub fn model_names(&self) -> Vec<ModelName> {
        self.models.values().map(|entry| entry.name.clone()).collect()
    }
}
