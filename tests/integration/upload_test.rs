//! Image uploads and static serving.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

/// The eight-byte PNG signature.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn test_upload_then_serve() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/uploads",
            Some(json!({ "base64": "data:image/png;base64,iVBORw0KGgo=" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().unwrap().to_string();
    assert!(id.ends_with(".png"));
    assert!(app.upload_dir.path().join(&id).exists());

    let served = app.send("GET", &format!("/uploads/{id}"), None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.bytes.as_ref(), PNG_SIGNATURE);
    assert_eq!(
        served.headers.get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
}

#[tokio::test]
async fn test_raw_base64_and_jpeg_extension() {
    let app = TestApp::new().await;

    let raw = app
        .request("POST", "/uploads", Some(json!({ "base64": "aGVsbG8=" })))
        .await;
    assert_eq!(raw.status, StatusCode::CREATED);
    assert!(raw.body["id"].as_str().unwrap().ends_with(".png"));

    let jpeg = app
        .request(
            "POST",
            "/uploads",
            Some(json!({ "base64": "data:image/jpeg;base64,aGVsbG8=" })),
        )
        .await;
    assert!(jpeg.body["id"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_rejected_uploads() {
    let app = TestApp::new().await;

    let not_base64 = app
        .request("POST", "/uploads", Some(json!({ "base64": "***" })))
        .await;
    assert_eq!(not_base64.status, StatusCode::BAD_REQUEST);

    let not_image = app
        .request(
            "POST",
            "/uploads",
            Some(json!({ "base64": "data:text/plain;base64,aGVsbG8=" })),
        )
        .await;
    assert_eq!(not_image.status, StatusCode::BAD_REQUEST);

    // Decodes to 75 000 bytes, over the 64 KiB test limit
    let oversized = app
        .request(
            "POST",
            "/uploads",
            Some(json!({ "base64": "A".repeat(100_000) })),
        )
        .await;
    assert_eq!(oversized.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_serving_unknown_or_unsafe_names() {
    let app = TestApp::new().await;

    let missing = app.send("GET", "/uploads/nothing.png", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let hidden = app.send("GET", "/uploads/.env", None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let traversal = app.send("GET", "/uploads/..%2FCargo.toml", None).await;
    assert_eq!(traversal.status, StatusCode::NOT_FOUND);
}
