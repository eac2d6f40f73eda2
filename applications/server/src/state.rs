/// Shared application state
use crate::error::{Result, ServerError};
use std::sync::Arc;
use userdb_core::UserRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Run a blocking store call on tokio's blocking pool.
    ///
    /// Store calls block on file I/O for their whole duration and must not run
    /// on the async workers.
    pub async fn with_users<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn UserRepository) -> userdb_core::Result<T> + Send + 'static,
    {
        let users = Arc::clone(&self.users);
        let outcome = tokio::task::spawn_blocking(move || f(users.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(format!("{} task failed: {}", operation, e)))?;

        outcome.map_err(|e| {
            tracing::warn!("{} returns error: {}", operation, e);
            ServerError::Store(e)
        })
    }
}
