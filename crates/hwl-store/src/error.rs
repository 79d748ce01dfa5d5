/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document with this id exists.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document with this id already exists.
    #[error("document already exists: {0}")]
    Conflict(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure (poisoned lock, failed background task).
    #[error("backend error: {0}")]
    Backend(String),

    /// The request was cancelled before the operation ran.
    #[error("request cancelled")]
    Cancelled,

    /// The request deadline passed before the operation completed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// The store has been disconnected.
    #[error("store is disconnected")]
    Disconnected,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
