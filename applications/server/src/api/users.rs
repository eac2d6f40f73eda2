/// Users API routes
use crate::{
    api::extract::{JsonBody, UserIdParam},
    error::Result,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use userdb_core::{CreateUserRequest, UpdateUserRequest, User, UserList};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// GET /api/v1/users
/// All users keyed by id
pub async fn search_users(State(app_state): State<AppState>) -> Result<Json<UserList>> {
    let store = app_state
        .with_users("get_all", |users| users.get_all())
        .await?;
    Ok(Json(store.list))
}

/// POST /api/v1/users
/// Create a user; the server stamps `created_at`
pub async fn create_user(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    req.validate();

    let id = app_state
        .with_users("insert", move |users| users.insert(req))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user_id: id.into_inner(),
        }),
    ))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(app_state): State<AppState>,
    UserIdParam(id): UserIdParam,
) -> Result<Json<User>> {
    let user = app_state
        .with_users("get", move |users| users.get(&id))
        .await?;
    Ok(Json(user))
}

/// PATCH /api/v1/users/:id
/// Change the display name; email and creation time stay as they are
pub async fn update_user(
    State(app_state): State<AppState>,
    UserIdParam(id): UserIdParam,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<StatusCode> {
    req.validate();

    app_state
        .with_users("update", move |users| users.update(&id, req))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(app_state): State<AppState>,
    UserIdParam(id): UserIdParam,
) -> Result<StatusCode> {
    app_state
        .with_users("delete", move |users| users.delete(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
