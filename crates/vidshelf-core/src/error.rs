use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("video already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by [`Catalog`](crate::catalog::Catalog) operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),
    #[error("video '{0}' does not exist")]
    NotFound(String),
    #[error("video '{0}' already exists")]
    AlreadyExists(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for CatalogError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(id) => Self::AlreadyExists(id),
            other => Self::Storage(other.to_string()),
        }
    }
}
