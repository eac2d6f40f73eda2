/// User domain types and the on-disk store envelope
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored user record.
///
/// The id is not part of the record; it is the key under which the record
/// sits in [`UserStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Creation timestamp, stamped by the server (RFC 3339 on disk)
    pub created_at: DateTime<Utc>,

    /// Display name
    pub display_name: String,

    /// Email address, immutable after creation
    pub email: String,
}

impl User {
    /// Build a record from a create request
    pub fn from_request(request: CreateUserRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            display_name: request.display_name,
            email: request.email,
        }
    }
}

/// Users keyed by the decimal string of their id. No ordering.
pub type UserList = HashMap<String, User>;

/// The single JSON document persisted to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStore {
    /// Last id handed out; never decreases and never reused
    pub increment: u64,

    /// All users by id
    pub list: UserList,
}

/// Payload for creating a user; absent fields decode as empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    /// Display name
    pub display_name: String,

    /// Email address
    pub email: String,
}

impl CreateUserRequest {
    /// Accepts every payload, empty strings included.
    pub fn validate(&self) {}
}

/// Partial update payload; only the display name can change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    /// New display name
    pub display_name: String,
}

impl UpdateUserRequest {
    /// Accepts every payload, empty strings included.
    pub fn validate(&self) {}
}
