//! Gateway-level error taxonomy.
//!
//! Every client-visible failure of the event protocol maps onto one of
//! these variants; handlers turn them into a single `error` event emitted
//! to the offending connection only.

use thiserror::Error;

use crate::domain::{DomainError, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// An event arrived before an identity was bound to the connection.
    #[error("not authenticated")]
    NotAuthenticated,
    /// A durable identity reference was supplied but does not resolve.
    #[error("user '{0}' not found")]
    IdentityNotFound(String),
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),
    /// The anonymous-sender cooldown is still active.
    #[error("rate limited, retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: i64 },
    /// An external dependency (store, cache, catalog) failed.
    #[error("external dependency failed: {0}")]
    External(String),
}

impl GatewayError {
    /// Client-facing error text. External failures are deliberately opaque.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::NotAuthenticated => "Not authenticated".to_string(),
            GatewayError::IdentityNotFound(_) => "User not found".to_string(),
            GatewayError::Validation(msg) => msg.clone(),
            GatewayError::RateLimited { retry_after_ms } => format!(
                "Please wait {} seconds before sending another message",
                retry_after_ms.div_euclid(1000) + i64::from(retry_after_ms % 1000 != 0)
            ),
            GatewayError::External(_) => "Something went wrong, please try again".to_string(),
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        GatewayError::Validation(err.to_string())
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        GatewayError::External(err.to_string())
    }
}
