/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use userdb_core::StoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: &'static str,
}

impl ServerError {
    /// Status, status text and code rendered to the client.
    ///
    /// Only these fixed values ever leave the server; the error's own message
    /// is for logs.
    pub fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ServerError::Store(err) => (
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                err.status_text(),
                err.code(),
            ),
            ServerError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid request.",
                "invalid_request_body",
            ),
            ServerError::Internal(_) | ServerError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.",
                "internal_server_error",
            ),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::Store(StoreError::UserNotFound(_)) | ServerError::InvalidBody(_) => {}
            ServerError::Store(StoreError::Internal(msg))
            | ServerError::Internal(msg)
            | ServerError::Config(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
        }

        let (status, status_text, code) = self.parts();
        let body = Json(ErrorBody {
            status: status_text,
            error: code,
        });

        (status, body).into_response()
    }
}
