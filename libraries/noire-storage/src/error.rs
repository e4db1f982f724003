/// Storage-specific errors
use noire_core::NoireError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored blob could not be decoded
    #[error("Corrupt policy blob at {location}: {source}")]
    Corrupt {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Shared state poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for NoireError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => NoireError::Io(e),
            other => NoireError::storage(other.to_string()),
        }
    }
}
