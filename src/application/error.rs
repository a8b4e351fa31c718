//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add pipeline-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("criteria dataset is empty")]
    EmptyDataset,
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
