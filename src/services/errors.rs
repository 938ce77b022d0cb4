use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Repository and validation details are logged where they occur; routes only
/// need enough structure to pick a status code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller's input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested entity does not exist.
    #[error("not found")]
    NotFound,
    /// The storage layer rejected the operation.
    #[error("storage error")]
    Storage,
    /// Unexpected internal failure.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
