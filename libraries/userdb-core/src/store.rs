//! User persistence backed by a single JSON file
//!
//! Every operation performs a full cycle against the file: read it, parse the
//! whole envelope, mutate, serialize the whole envelope, overwrite the file.
//! Nothing is cached between calls and nothing is locked, so two concurrent
//! mutating calls can interleave and the last writer wins in full.

use crate::error::{Result, StoreError};
use crate::types::{CreateUserRequest, UpdateUserRequest, User, UserId, UserStore};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Span;

/// Storage operations the HTTP layer depends on.
///
/// Methods are synchronous and block on file I/O for their whole duration.
pub trait UserRepository: Send + Sync {
    /// Load the whole envelope
    fn get_all(&self) -> Result<UserStore>;

    /// Look up a single user
    fn get(&self, id: &UserId) -> Result<User>;

    /// Create a user and return its freshly minted id
    fn insert(&self, request: CreateUserRequest) -> Result<UserId>;

    /// Replace the display name of an existing user
    fn update(&self, id: &UserId, request: UpdateUserRequest) -> Result<()>;

    /// Remove a user; its id is never handed out again
    fn delete(&self, id: &UserId) -> Result<()>;
}

/// [`UserRepository`] over a JSON file on local disk.
///
/// The file must already exist. A missing file is reported as an internal
/// error by every operation; see [`JsonFileStore::seed`] for creating one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    span: Span,
}

impl JsonFileStore {
    /// Create a store for `path`, logging under a `user_store` span
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let span = tracing::info_span!("user_store", path = %path.display());
        Self { path, span }
    }

    /// Create a store that logs under the given span
    pub fn with_span(path: impl Into<PathBuf>, span: Span) -> Self {
        Self {
            path: path.into(),
            span,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty envelope (`{"increment":0,"list":{}}`) to `path`.
    ///
    /// Refuses to touch a file that already exists.
    pub fn seed(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec(&UserStore::default())
            .map_err(|e| StoreError::internal(format!("serialize empty store: {}", e)))?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| StoreError::internal(format!("create {}: {}", path.display(), e)))?;

        file.write_all(&bytes)
            .map_err(|e| StoreError::internal(format!("write {}: {}", path.display(), e)))
    }

    fn read_store(&self, operation: &'static str) -> Result<UserStore> {
        let bytes = fs::read(&self.path).map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to read store file");
            StoreError::internal(format!("read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to parse store file");
            StoreError::internal(format!("parse {}: {}", self.path.display(), e))
        })
    }

    fn write_store(&self, operation: &'static str, store: &UserStore) -> Result<()> {
        let bytes = serde_json::to_vec(store).map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to serialize store");
            StoreError::internal(format!("serialize store: {}", e))
        })?;

        fs::write(&self.path, bytes).map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to write store file");
            StoreError::internal(format!("write {}: {}", self.path.display(), e))
        })
    }

    fn not_found(operation: &'static str, id: &UserId) -> StoreError {
        tracing::info!(operation, user_id = %id, "User does not exist");
        StoreError::UserNotFound(id.clone())
    }
}

impl UserRepository for JsonFileStore {
    fn get_all(&self) -> Result<UserStore> {
        let _guard = self.span.enter();
        self.read_store("get_all")
    }

    fn get(&self, id: &UserId) -> Result<User> {
        let _guard = self.span.enter();
        let mut store = self.read_store("get")?;

        store
            .list
            .remove(id.as_str())
            .ok_or_else(|| Self::not_found("get", id))
    }

    fn insert(&self, request: CreateUserRequest) -> Result<UserId> {
        let _guard = self.span.enter();
        let mut store = self.read_store("insert")?;

        store.increment = store.increment.checked_add(1).ok_or_else(|| {
            tracing::warn!(operation = "insert", "Increment counter exhausted");
            StoreError::internal("increment counter overflow")
        })?;

        let id = UserId::from_increment(store.increment);
        let user = User::from_request(request, Utc::now());
        store.list.insert(id.as_str().to_string(), user);

        self.write_store("insert", &store)?;
        tracing::debug!(user_id = %id, "User created");

        Ok(id)
    }

    fn update(&self, id: &UserId, request: UpdateUserRequest) -> Result<()> {
        let _guard = self.span.enter();
        let mut store = self.read_store("update")?;

        let user = store
            .list
            .get_mut(id.as_str())
            .ok_or_else(|| Self::not_found("update", id))?;
        user.display_name = request.display_name;

        self.write_store("update", &store)
    }

    fn delete(&self, id: &UserId) -> Result<()> {
        let _guard = self.span.enter();
        let mut store = self.read_store("delete")?;

        if store.list.remove(id.as_str()).is_none() {
            return Err(Self::not_found("delete", id));
        }

        self.write_store("delete", &store)
    }
}
