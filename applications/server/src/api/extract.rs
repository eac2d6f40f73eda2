/// Request extractors that reject with the service's own error bodies
use crate::error::ServerError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use userdb_core::{StoreError, UserId};

/// The `{id}` path segment, handed to the handler as an explicit parameter.
///
/// An empty or unreadable segment is answered with `user_not_found` before
/// any store call is made.
#[derive(Debug, Clone)]
pub struct UserIdParam(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => id,
            Err(rejection) => {
                tracing::debug!("Path rejected: {}", rejection.body_text());
                String::new()
            }
        };

        if id.trim().is_empty() {
            return Err(StoreError::UserNotFound(UserId::new(id)).into());
        }

        Ok(Self(UserId::new(id)))
    }
}

/// JSON request body; a malformed body renders `invalid_request_body`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Bind returns error: {}", rejection.body_text());
            ServerError::InvalidBody(rejection.body_text())
        })?;

        Ok(Self(value))
    }
}
