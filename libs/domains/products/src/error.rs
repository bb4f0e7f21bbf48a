use specification::{EntityId, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(EntityId),

    #[error("Cannot update this product: path id {path} does not match body id {body}")]
    IdMismatch { path: EntityId, body: EntityId },

    #[error("Cannot update this product: product {0} does not exist")]
    UpdateTargetMissing(EntityId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Page size {requested} exceeds the maximum of {max}")]
    PageSizeExceeded { requested: i64, max: usize },

    #[error("Problem {0} the product")]
    PersistenceFailure(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Whether the caller sent something wrong, as opposed to a store fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ProductError::PersistenceFailure(_) | ProductError::Repository(_)
        )
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ProductError::IdMismatch { path: 5, body: 7 };
        assert_eq!(
            err.to_string(),
            "Cannot update this product: path id 5 does not match body id 7"
        );
        assert_eq!(
            ProductError::PersistenceFailure("updating").to_string(),
            "Problem updating the product"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ProductError::NotFound(1).is_client_error());
        assert!(ProductError::Validation("bad".into()).is_client_error());
        assert!(!ProductError::PersistenceFailure("creating").is_client_error());
        assert!(
            !ProductError::Repository(RepositoryError::Unavailable("down".into()))
                .is_client_error()
        );
    }
}
