//! userdb Core
//!
//! Domain types, the JSON file store and the error taxonomy behind the
//! userdb REST service.
//!
//! # Architecture
//!
//! - **Domain Types**: `User`, `UserStore` (the on-disk envelope) and the
//!   create/update request payloads
//! - **Store**: the `UserRepository` trait and its `JsonFileStore`
//!   implementation, which reads and rewrites the whole file on every call
//! - **Error Handling**: `StoreError` with exactly two kinds, not-found and
//!   internal
//!
//! # Example
//!
//! ```rust,no_run
//! use userdb_core::{CreateUserRequest, JsonFileStore, UserRepository};
//!
//! # fn example() -> userdb_core::Result<()> {
//! let store = JsonFileStore::new("users.json");
//!
//! let id = store.insert(CreateUserRequest {
//!     display_name: "Ann".to_string(),
//!     email: "a@x.com".to_string(),
//! })?;
//!
//! let user = store.get(&id)?;
//! assert_eq!(user.display_name, "Ann");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use store::{JsonFileStore, UserRepository};
pub use types::{CreateUserRequest, UpdateUserRequest, User, UserId, UserList, UserStore};
