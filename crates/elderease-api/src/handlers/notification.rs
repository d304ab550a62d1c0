//! Notification handlers.

use axum::Json;
use axum::extract::State;

use elderease_core::types::NotificationId;
use elderease_entity::notification::Notification;

use crate::dto::request::NotificationQuery;
use crate::dto::response::{CountResponse, MarkedResponse};
use crate::error::ApiResult;
use crate::extractors::{ValidatedPath, ValidatedQuery};
use crate::state::AppState;

/// GET /notifications?userId=
pub async fn list_notifications(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.notification_service.list(query.user_id).await?))
}

/// GET /notifications/unread-count?userId=
pub async fn unread_count(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<CountResponse>> {
    let count = state.notification_service.unread_count(query.user_id).await?;
    Ok(Json(CountResponse { count }))
}

/// PATCH /notifications/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<NotificationId>,
) -> ApiResult<Json<Notification>> {
    Ok(Json(state.notification_service.mark_read(id).await?))
}

/// PATCH /notifications/read-all?userId=
pub async fn mark_all_read(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<MarkedResponse>> {
    let marked = state.notification_service.mark_all_read(query.user_id).await?;
    Ok(Json(MarkedResponse { marked }))
}
