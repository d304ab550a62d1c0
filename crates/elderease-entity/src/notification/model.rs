//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use elderease_core::types::{NotificationId, TaskId, UserId};

/// A message addressed to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Machine-readable event kind, e.g. `task_accepted`.
    pub kind: String,
    /// Short headline.
    pub title: String,
    /// Rendered body text.
    pub message: String,
    /// Related task, if any.
    #[serde(default)]
    pub task_id: Option<TaskId>,
    /// Whether the recipient has seen it.
    #[serde(default)]
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to store a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub task_id: Option<TaskId>,
}
