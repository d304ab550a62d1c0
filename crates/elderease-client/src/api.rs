//! Typed wrapper over the ElderEase REST API.

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::{NotificationId, TaskId, UserId};
use elderease_entity::message::{Message, NewMessage};
use elderease_entity::notification::Notification;
use elderease_entity::task::{NewTask, Task, TaskFilter};
use elderease_entity::user::{NewUser, User, UserFilter, UserType};
use elderease_service::TaskUpdate;

use crate::config::ClientConfig;

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct MarkedBody {
    marked: u64,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RateBody {
    rating: i32,
    task_id: TaskId,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for `config.base_url`.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self { http, base })
    }

    /// The API root every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // ── Health ───────────────────────────────────────────────────

    /// Whether the server reports itself healthy.
    pub async fn health(&self) -> AppResult<bool> {
        let url = self.url("health")?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;
        Ok(response.status().is_success())
    }

    // ── Users ────────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let body = json!({ "username": username, "password": password });
        self.send(self.request(Method::POST, "login")?.json(&body))
            .await
    }

    pub async fn register(&self, user: &NewUser) -> AppResult<User> {
        self.send(self.request(Method::POST, "users")?.json(user))
            .await
    }

    pub async fn find_users(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut url = self.url("users")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(username) = &filter.username {
                pairs.append_pair("username", username);
            }
            if let Some(phone) = &filter.phone_number {
                pairs.append_pair("phoneNumber", phone);
            }
            if let Some(user_type) = filter.user_type {
                pairs.append_pair("userType", user_type.as_str());
            }
        }
        self.send(self.http.get(url)).await
    }

    pub async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.send(self.request(Method::GET, &format!("users/{id}"))?)
            .await
    }

    /// Rate the volunteer of a confirmed task.
    pub async fn rate_user(&self, id: UserId, task_id: TaskId, rating: i32) -> AppResult<User> {
        let body = RateBody { rating, task_id };
        self.send(
            self.request(Method::PATCH, &format!("users/{id}/rate"))?
                .json(&body),
        )
        .await
    }

    // ── Tasks ────────────────────────────────────────────────────

    pub async fn list_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<Task>> {
        let mut url = self.url("tasks")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(id) = filter.elderly_id {
                pairs.append_pair("elderlyId", &id.to_string());
            }
            if let Some(id) = filter.volunteer_id {
                pairs.append_pair("volunteerId", &id.to_string());
            }
            if let Some(status) = filter.status {
                pairs.append_pair("status", status.as_str());
            }
            if let Some(archived) = filter.archived {
                pairs.append_pair("archived", if archived { "true" } else { "false" });
            }
        }
        self.send(self.http.get(url)).await
    }

    /// Tasks belonging to a user in their role.
    pub async fn tasks_for(&self, user: &User) -> AppResult<Vec<Task>> {
        let filter = match user.user_type {
            UserType::Elderly => TaskFilter {
                elderly_id: Some(user.id),
                ..Default::default()
            },
            UserType::Volunteer => TaskFilter {
                volunteer_id: Some(user.id),
                ..Default::default()
            },
        };
        self.list_tasks(&filter).await
    }

    pub async fn get_task(&self, id: TaskId) -> AppResult<Task> {
        self.send(self.request(Method::GET, &format!("tasks/{id}"))?)
            .await
    }

    pub async fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        self.send(self.request(Method::POST, "tasks")?.json(task))
            .await
    }

    pub async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> AppResult<Task> {
        self.send(
            self.request(Method::PATCH, &format!("tasks/{id}"))?
                .json(update),
        )
        .await
    }

    pub async fn archive_task(&self, id: TaskId) -> AppResult<Task> {
        self.send(self.request(Method::PATCH, &format!("tasks/{id}/archive"))?)
            .await
    }

    // ── Messages ─────────────────────────────────────────────────

    pub async fn list_messages(&self, task_id: TaskId) -> AppResult<Vec<Message>> {
        self.send(self.request(Method::GET, &format!("tasks/{task_id}/messages"))?)
            .await
    }

    pub async fn post_message(&self, message: &NewMessage) -> AppResult<Message> {
        let body = json!({
            "senderId": message.sender_id,
            "senderName": message.sender_name,
            "content": message.content,
        });
        self.send(
            self.request(Method::POST, &format!("tasks/{}/messages", message.task_id))?
                .json(&body),
        )
        .await
    }

    // ── Notifications ────────────────────────────────────────────

    pub async fn notifications(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let url = self.url_with_user("notifications", user_id)?;
        self.send(self.http.get(url)).await
    }

    pub async fn unread_count(&self, user_id: UserId) -> AppResult<i64> {
        let url = self.url_with_user("notifications/unread-count", user_id)?;
        let body: CountBody = self.send(self.http.get(url)).await?;
        Ok(body.count)
    }

    pub async fn mark_read(&self, id: NotificationId) -> AppResult<Notification> {
        self.send(self.request(Method::PATCH, &format!("notifications/{id}"))?)
            .await
    }

    pub async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let url = self.url_with_user("notifications/read-all", user_id)?;
        let body: MarkedBody = self.send(self.http.patch(url)).await?;
        Ok(body.marked)
    }

    // ── Uploads ──────────────────────────────────────────────────

    /// Upload a base64 image (raw or data URL). Returns the stored file name.
    pub async fn upload_image(&self, base64: &str) -> AppResult<String> {
        let body = json!({ "base64": base64 });
        let uploaded: UploadBody = self
            .send(self.request(Method::POST, "uploads")?.json(&body))
            .await?;
        Ok(uploaded.id)
    }

    /// Absolute URL of an uploaded file.
    pub fn upload_url(&self, file: &str) -> AppResult<Url> {
        self.url(&format!("uploads/{file}"))
    }

    // ── Plumbing ─────────────────────────────────────────────────

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid request path '{path}': {e}")))
    }

    fn url_with_user(&self, path: &str, user_id: UserId) -> AppResult<Url> {
        let mut url = self.url(path)?;
        url.query_pairs_mut()
            .append_pair("userId", &user_id.to_string());
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(path)?))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    "Unexpected response body from server",
                    e,
                )
            });
        }

        let body = response.json::<ErrorBody>().await.ok();
        Err(error_from_response(status, body))
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, format!("Request failed: {err}"), err)
}

/// Rebuild an [`AppError`] from the server's `{error, code}` body.
fn error_from_response(status: StatusCode, body: Option<ErrorBody>) -> AppError {
    let (message, code) = match body {
        Some(body) => (body.error, body.code),
        None => (format!("Server responded with {status}"), String::new()),
    };
    AppError::new(kind_for(status, &code), message)
}

fn kind_for(status: StatusCode, code: &str) -> ErrorKind {
    match code {
        "NOT_FOUND" => ErrorKind::NotFound,
        "AUTHENTICATION" => ErrorKind::Authentication,
        "VALIDATION" => ErrorKind::Validation,
        "CONFLICT" => ErrorKind::Conflict,
        "INVALID_TRANSITION" => ErrorKind::InvalidTransition,
        _ => match status {
            StatusCode::BAD_REQUEST => ErrorKind::Validation,
            StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            _ => ErrorKind::Internal,
        },
    }
}
