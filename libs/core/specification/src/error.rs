use thiserror::Error;

/// Hard store faults.
///
/// Ordinary outcomes (no matching row, empty result, rejected commit) are
/// values, not errors: `Option`, empty `Vec` and `Ok(false)` respectively.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
