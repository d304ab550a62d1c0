//! Route definitions for the ElderEase HTTP API.
//!
//! Paths are mounted at the root, the way the web client calls them.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route and the body size limit.
///
/// Cross-cutting layers (CORS, tracing, compression) are added by
/// [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(task_routes())
        .merge(notification_routes())
        .merge(upload_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::auth::login))
}

/// Registration, lookup and rating
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::register),
        )
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}/rate", patch(handlers::user::rate_user))
}

/// Task CRUD, lifecycle and chat
fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(handlers::task::list_tasks).post(handlers::task::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::task::get_task).patch(handlers::task::update_task),
        )
        .route("/tasks/{id}/archive", patch(handlers::task::archive_task))
        .route(
            "/tasks/{id}/messages",
            get(handlers::message::list_messages).post(handlers::message::post_message),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            patch(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            patch(handlers::notification::mark_read),
        )
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads", post(handlers::upload::upload))
        .route("/uploads/{file}", get(handlers::upload::serve_upload))
}
