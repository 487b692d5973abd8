// Central Error Type for the Enqueue Subsystem

use thiserror::Error;

/// Boxed storage engine error, kept intact so callers can downcast it
pub type StorageError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum QueueError {
    /// Job has an empty type; raised before any statement is issued
    #[error("job type must not be empty")]
    MissingType,

    /// Failure reported by the storage engine, passed through unchanged
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueueError {
    /// Wrap any storage engine error
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        QueueError::Storage(Box::new(err))
    }

    pub fn is_missing_type(&self) -> bool {
        matches!(self, QueueError::MissingType)
    }
}

/// Result type alias using QueueError
pub type Result<T> = std::result::Result<T, QueueError>;
