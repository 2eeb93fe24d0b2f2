//! Shared error type for warband use cases.

use warband_domain::{CatalogError, DomainError, ValidationError, WarbandId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum WarbandError {
    #[error("Warband not found: {0}")]
    NotFound(WarbandId),

    /// The resulting warband breaks at least one rule.
    #[error("Warband failed validation with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported export version: {0}")]
    UnsupportedVersion(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
