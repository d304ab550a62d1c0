//! Request DTOs for all API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_core::types::{TaskId, UserId};
use elderease_entity::message::NewMessage;
use elderease_entity::task::{NewTask, TaskFilter, TaskStatus};
use elderease_entity::user::{NewUser, UserType};
use elderease_service::TaskUpdate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub user_type: UserType,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub transportation: Vec<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            username: req.username,
            password: req.password,
            user_type: req.user_type,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            address: req.address,
            languages: req.languages,
            birth_date: req.birth_date,
            transportation: req.transportation,
        }
    }
}

/// Create task request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub elderly_id: UserId,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewTask {
            title: req.title,
            description: req.description,
            elderly_id: req.elderly_id,
            image: req.image,
        }
    }
}

/// Partial task update body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    pub volunteer_id: Option<UserId>,
    pub elderly_confirmed: Option<bool>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<UpdateTaskRequest> for TaskUpdate {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskUpdate {
            status: req.status,
            volunteer_id: req.volunteer_id,
            elderly_confirmed: req.elderly_confirmed,
            rating: req.rating,
            title: req.title,
            description: req.description,
            image: req.image,
        }
    }
}

/// Chat message body. The task id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "Message content is required"))]
    pub content: String,
}

impl PostMessageRequest {
    /// Attach the path's task id.
    pub fn into_new_message(self, task_id: TaskId) -> NewMessage {
        NewMessage {
            task_id,
            sender_id: self.sender_id,
            sender_name: self.sender_name,
            content: self.content,
        }
    }
}

/// Volunteer rating body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RateUserRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub task_id: TaskId,
}

/// Image upload body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadRequest {
    #[validate(length(min = 1, message = "base64 payload is required"))]
    pub base64: String,
}

/// Query parameters for `GET /tasks`.
///
/// `userId` with `userType` is shorthand for the elderly or volunteer
/// filter, whichever matches the role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub elderly_id: Option<UserId>,
    pub volunteer_id: Option<UserId>,
    pub status: Option<String>,
    pub archived: Option<bool>,
    pub user_id: Option<UserId>,
    pub user_type: Option<UserType>,
}

impl TaskQuery {
    /// Resolve into a store filter.
    pub fn into_filter(self) -> AppResult<TaskFilter> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;

        let mut filter = TaskFilter {
            elderly_id: self.elderly_id,
            volunteer_id: self.volunteer_id,
            status,
            archived: self.archived,
        };

        match (self.user_id, self.user_type) {
            (Some(id), Some(UserType::Elderly)) => filter.elderly_id = Some(id),
            (Some(id), Some(UserType::Volunteer)) => filter.volunteer_id = Some(id),
            (Some(_), None) => {
                return Err(AppError::validation("userId requires userType"));
            }
            (None, _) => {}
        }

        Ok(filter)
    }
}

/// Query parameters identifying the notification owner.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub user_id: UserId,
}
