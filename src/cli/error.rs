//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("unknown taxonomic code: {0}")]
    UnknownCode(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownCode(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::FileNotFound(_) => crate::exitcode::NOINPUT,
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Json { .. } | InfraError::InvalidFormat { .. } => {
                    crate::exitcode::DATAERR
                }
                InfraError::Application(e) => match e {
                    ApplicationError::Domain(_) | ApplicationError::EmptyDataset => {
                        crate::exitcode::DATAERR
                    }
                },
            },
        }
    }
}
