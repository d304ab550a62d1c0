//! Task chat handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use elderease_core::types::TaskId;
use elderease_entity::message::Message;

use crate::dto::request::PostMessageRequest;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedPath};
use crate::state::AppState;

/// GET /tasks/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    ValidatedPath(task_id): ValidatedPath<TaskId>,
) -> ApiResult<Json<Vec<Message>>> {
    Ok(Json(state.message_service.list(task_id).await?))
}

/// POST /tasks/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    ValidatedPath(task_id): ValidatedPath<TaskId>,
    ValidatedJson(req): ValidatedJson<PostMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let message = state
        .message_service
        .post(req.into_new_message(task_id))
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
