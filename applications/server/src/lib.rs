//! userdb Server Library
//!
//! REST service exposing CRUD over users stored in a single JSON file.
//!
//! This library exposes the router and its building blocks for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod shutdown;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
