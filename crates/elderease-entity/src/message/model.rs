//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use elderease_core::types::{MessageId, TaskId, UserId};

/// A chat message attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The task this message belongs to.
    pub task_id: TaskId,
    /// Author.
    pub sender_id: UserId,
    /// Author's display name at the time of sending.
    pub sender_name: String,
    /// Body text.
    pub content: String,
    /// Send time.
    pub timestamp: DateTime<Utc>,
}

/// Data required to post a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub task_id: TaskId,
    pub sender_id: UserId,
    /// Falls back to the sender's full name when absent.
    #[serde(default)]
    pub sender_name: Option<String>,
    pub content: String,
}
