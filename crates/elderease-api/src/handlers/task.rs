//! Task handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use elderease_core::types::TaskId;
use elderease_entity::task::Task;

use crate::dto::request::{CreateTaskRequest, TaskQuery, UpdateTaskRequest};
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::state::AppState;

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TaskQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.task_service.list(&filter).await?))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<TaskId>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.task_service.get(id).await?))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.task_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<TaskId>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.task_service.update(id, req.into()).await?;
    Ok(Json(task))
}

/// PATCH /tasks/{id}/archive
pub async fn archive_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<TaskId>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.task_service.archive(id).await?))
}
