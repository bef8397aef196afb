//! Configuration Management
//!
//! Run configuration and the builder used by scenarios and the CLI.

pub mod builder;
pub mod run;

// Re-export main types
pub use builder::RunConfigBuilder;
pub use run::{ApiEndpoint, Budget, RunConfig, DEFAULT_PROMPT};
