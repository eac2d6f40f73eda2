//! Domain types for userdb

mod ids;
mod user;

pub use ids::UserId;
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserList, UserStore};
