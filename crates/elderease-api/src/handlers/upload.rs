//! Image upload and static serving.

use axum::Json;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::dto::request::UploadRequest;
use crate::dto::response::UploadResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedPath};
use crate::state::AppState;

/// POST /uploads
pub async fn upload(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UploadRequest>,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let id = state.uploads.save_base64(&req.base64).await?;
    tracing::info!(file = %id, "Upload stored");
    Ok((StatusCode::CREATED, Json(UploadResponse { id })))
}

/// GET /uploads/{file}
pub async fn serve_upload(
    State(state): State<AppState>,
    ValidatedPath(file): ValidatedPath<String>,
    request: Request,
) -> ApiResult<Response> {
    let path = state.uploads.resolve(&file)?;
    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new).into_response())
}
