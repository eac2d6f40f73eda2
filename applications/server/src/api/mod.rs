/// API route modules
pub mod extract;
pub mod health;
pub mod root;
pub mod users;

use crate::{error::ServerError, state::AppState};
use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::{any::Any, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router with its middleware stack.
pub fn router(app_state: AppState, request_timeout: Duration) -> Router {
    let user_routes = Router::new()
        .route(
            "/users",
            get(users::search_users).post(users::create_user),
        )
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        );

    let routes = Router::new()
        .route("/", get(root::now))
        .route("/health", get(health::health))
        .nest("/api/v1", user_routes);

    with_middleware(routes, request_timeout).with_state(app_state)
}

/// Layers, outermost first: request id, HTTP tracing, panic recovery,
/// request timeout.
fn with_middleware(routes: Router<AppState>, request_timeout: Duration) -> Router<AppState> {
    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        "unknown panic".to_string()
    };

    ServerError::Internal(format!("handler panicked: {}", detail)).into_response()
}
