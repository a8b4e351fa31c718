//! Infrastructure-level errors (I/O and serialization)

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap I/O and serde failures around the pipeline.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid asset format in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for infrastructure operations.
pub type InfraResult<T> = Result<T, InfraError>;
