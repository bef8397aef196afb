//! Shared error types for the test harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Failed to read manifest {path}: {message}")]
    ManifestRead { path: String, message: String },

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: String, message: String },

    #[error("Manifest {path} lists no models")]
    EmptyManifest { path: String },

    #[error("Invalid model identifier: {input}")]
    InvalidModel { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
