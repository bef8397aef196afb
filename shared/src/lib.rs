//! Shared types for the ollama image test harness
//!
//! Holds what more than one crate needs: the models manifest, resource
//! naming helpers, the shared error type and tracing setup.

pub mod errors;
pub mod logging;
pub mod manifest;
pub mod types;

pub use errors::*;
pub use manifest::{ModelEntry, ModelManifest, DEFAULT_MANIFEST_PATH};
pub use types::*;
