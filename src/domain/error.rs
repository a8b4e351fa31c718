//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the batch-transform contract.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("code group '{0}' has no clauses")]
    EmptyCodeGroup(String),

    #[error("invalid taxonomic code: '{0}' (must be non-empty, letters only)")]
    InvalidCode(String),
}

/// Result type for clause-tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
