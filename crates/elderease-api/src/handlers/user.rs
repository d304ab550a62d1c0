//! User handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use elderease_core::types::UserId;
use elderease_entity::user::{User, UserFilter};

use crate::dto::request::{RateUserRequest, RegisterRequest};
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.list(&filter).await?))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<UserId>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.get(id).await?))
}

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /users/{id}/rate
pub async fn rate_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<UserId>,
    ValidatedJson(req): ValidatedJson<RateUserRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .rating_service
        .rate_for_task(id, req.task_id, req.rating)
        .await?;
    Ok(Json(user))
}
