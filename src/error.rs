use thiserror::Error;

use crate::lock::LockError;
use crate::model::StoreError;

/// Error type for client registry and wash queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Input failed field-level validation; nothing was written.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The request conflicts with existing data (e.g. a pending wash).
    #[error("{0}")]
    Conflict(String),

    /// The targeted record does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl QueueError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        QueueError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Map this error to an HTTP status code.
    ///
    /// Uniqueness violations from the store count as conflicts.
    pub fn status_code(&self) -> u16 {
        match self {
            QueueError::Validation { .. } => 400,
            QueueError::Conflict(_) => 409,
            QueueError::NotFound(_) => 404,
            QueueError::Store(StoreError::DuplicateKey { .. })
            | QueueError::Store(StoreError::DuplicateId { .. }) => 409,
            QueueError::Store(StoreError::NotFound { .. }) => 404,
            QueueError::Store(_) => 500,
            QueueError::Lock(_) => 500,
        }
    }
}
