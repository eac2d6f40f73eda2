//! Store error taxonomy

use crate::types::UserId;
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// The only two outcomes a consumer of the store needs to distinguish.
///
/// Each kind carries a fixed HTTP status, machine code and status text. The
/// payload of [`StoreError::Internal`] is diagnostic detail for logs and must
/// never be rendered to a client.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested id is not present in the user list
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Any I/O or (de)serialization failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create an internal error from any displayable cause
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this kind.
    ///
    /// A missing user answers 400 rather than 404; clients of the service
    /// depend on it.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::UserNotFound(_) => 400,
            StoreError::Internal(_) => 500,
        }
    }

    /// Machine-readable code rendered in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::UserNotFound(_) => "user_not_found",
            StoreError::Internal(_) => "internal_server_error",
        }
    }

    /// Human-readable status text rendered in error bodies
    pub fn status_text(&self) -> &'static str {
        match self {
            StoreError::UserNotFound(_) => "Invalid request.",
            StoreError::Internal(_) => "Internal server error.",
        }
    }

    /// Returns true for the not-found kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::UserNotFound(_))
    }
}
