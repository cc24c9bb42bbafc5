//! Error types shared by the codec, the store port, and the repository.

use thiserror::Error;

/// Record codec failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode post: {0}")]
    Encode(String),

    #[error("Stored bytes are not a valid post: {0}")]
    Decode(String),
}

/// Key-value backend failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store operation failed: {0}")]
    Operation(String),

    #[error("Store transaction failed: {0}")]
    Transaction(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("No post with link {0}")]
    NotFound(String),

    #[error(transparent)]
    Decode(#[from] CodecError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transaction(msg) => RepoError::Transaction(msg),
            other => RepoError::Storage(other.to_string()),
        }
    }
}
