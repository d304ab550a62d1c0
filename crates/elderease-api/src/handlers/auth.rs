//! Login handler.

use axum::Json;
use axum::extract::State;

use elderease_entity::user::User;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::dto::request::LoginRequest;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.login(&req.username, &req.password).await?;
    Ok(Json(user))
}
