//! Domain-level error types.

use thiserror::Error;

/// Validation failures for value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("topic id must not be empty")]
    EmptyTopicId,
    #[error("message content must not be empty")]
    EmptyMessageContent,
    #[error("message content exceeds {max} characters")]
    MessageTooLong { max: usize },
}

/// Failures of the durable store or cache backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures pushing messages to connected clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
