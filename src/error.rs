//! Error taxonomy for the directory core

use crate::providers::ProviderError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Remote fetch failed or returned something that is not a list of people.
    #[error("Network error: {0}")]
    Network(String),
    /// Reading or writing the persisted directory failed.
    #[error("Storage error: {0}")]
    Storage(String),
    /// User input was rejected before any mutation happened.
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

impl From<StorageError> for DirectoryError {
    fn from(e: StorageError) -> Self {
        DirectoryError::Storage(e.to_string())
    }
}

impl From<ProviderError> for DirectoryError {
    fn from(e: ProviderError) -> Self {
        DirectoryError::Network(e.to_string())
    }
}
