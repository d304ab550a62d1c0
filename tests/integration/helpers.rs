//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use elderease_api::{AppState, build_app};
use elderease_core::config::{AppConfig, UploadConfig};
use elderease_database::Stores;
use elderease_storage::LocalUploadStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct assertions
    pub stores: Stores,
    /// Upload directory, removed on drop
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let mut config = AppConfig::default();
        config.uploads = UploadConfig {
            directory: upload_dir.path().to_string_lossy().into_owned(),
            max_bytes: 64 * 1024,
        };

        let stores = Stores::memory();
        let uploads = LocalUploadStore::new(&config.uploads)
            .await
            .expect("Failed to init upload store");

        let router = build_app(AppState::new(config, stores.clone(), uploads));

        Self {
            router,
            stores,
            upload_dir,
        }
    }

    /// Register a user and return their id
    pub async fn register(&self, username: &str, user_type: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/users",
                Some(json!({
                    "username": username,
                    "password": "pw123",
                    "userType": user_type,
                    "firstName": capitalize(username),
                    "lastName": "Tester",
                    "phoneNumber": format!("555-{username}"),
                    "languages": ["English"],
                })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Create an open task for `elderly_id` and return its id
    pub async fn create_task(&self, elderly_id: i64, title: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/tasks",
                Some(json!({
                    "title": title,
                    "description": "Details",
                    "elderlyId": elderly_id,
                })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create task failed: {:?}",
            response.body
        );
        response.id()
    }

    /// PATCH /tasks/{id} with `body`
    pub async fn patch_task(&self, task_id: i64, body: Value) -> TestResponse {
        self.request("PATCH", &format!("/tasks/{task_id}"), Some(body))
            .await
    }

    /// Notifications of a user, newest first
    pub async fn notifications(&self, user_id: i64) -> Vec<Value> {
        let response = self
            .request("GET", &format!("/notifications?userId={user_id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body.as_array().cloned().unwrap_or_default()
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let raw = self.send(method, path, body).await;
        let body: Value = serde_json::from_slice(&raw.bytes).unwrap_or(Value::Null);
        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Make a request and keep the raw response body
    pub async fn send(&self, method: &str, path: &str, body: Option<Value>) -> RawResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        RawResponse {
            status,
            headers,
            bytes,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body
    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().expect("No id in response body")
    }

    /// The `code` field of an error body
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

/// Unparsed response
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Bytes,
}
