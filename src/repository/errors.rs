use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying database rejected the operation.
    #[error("database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    /// A pooled connection could not be acquired.
    #[error("connection pool error: {0}")]
    PoolError(#[from] diesel::r2d2::PoolError),
    /// A stored row failed domain validation on the way out.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Requested entity does not exist.
    #[error("not found")]
    NotFound,
}

impl RepositoryError {
    /// True when the error is a unique-constraint conflict, which the catalog
    /// resolver treats as "another writer created the same item first".
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::DatabaseError(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ))
        )
    }
}

/// Convenient alias for results returned from repository methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
