use hwl_store::StoreError;
use thiserror::Error;

/// Failure outcomes of worklist operations.
///
/// `BadRequest`, `NotFound` and `Conflict` are diagnosable by the client.
/// `BackendFailure` wraps any store error outside that taxonomy; the core
/// never retries it.
#[derive(Debug, Error)]
pub enum WorklistError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}: {source}")]
    BackendFailure {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl WorklistError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn backend(message: impl Into<String>, source: StoreError) -> Self {
        Self::BackendFailure {
            message: message.into(),
            source,
        }
    }

    /// The short client-facing message, without the backend cause.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) => m,
            Self::BackendFailure { message, .. } => message,
        }
    }
}

pub type WorklistResult<T> = Result<T, WorklistError>;
