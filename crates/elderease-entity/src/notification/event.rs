//! Notification events and their rendered text.

use serde::{Deserialize, Serialize};

use elderease_core::types::{TaskId, UserId};

use super::model::NewNotification;

/// Which side of a completed task a notification is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionAudience {
    Elderly,
    Volunteer,
}

/// Every event the system notifies users about.
///
/// Each variant carries the task title it refers to so that rendering
/// needs no further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A new open task was posted.
    TaskAvailable { task_title: String },
    /// A volunteer accepted the owner's task.
    TaskAccepted {
        task_title: String,
        volunteer_name: String,
    },
    /// The volunteer marked the task completed.
    TaskCompleted {
        task_title: String,
        audience: CompletionAudience,
    },
    /// The owner confirmed completion with a rating.
    TaskRated { task_title: String, rating: i32 },
    /// A direct rating was submitted for the volunteer.
    RatingReceived { task_title: String, rating: i32 },
    /// A message was posted in the task conversation.
    NewMessage { task_title: String },
}

impl NotificationEvent {
    /// Stable identifier stored in the notification `kind` column.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskAvailable { .. } => "task_available",
            Self::TaskAccepted { .. } => "task_accepted",
            Self::TaskCompleted { .. } => "task_completed",
            Self::TaskRated { .. } => "task_rated",
            Self::RatingReceived { .. } => "rating_received",
            Self::NewMessage { .. } => "new_message",
        }
    }

    /// Headline and body text.
    pub fn render(&self) -> (String, String) {
        match self {
            Self::TaskAvailable { task_title } => (
                "New Task Available".to_string(),
                format!("A new task \"{task_title}\" is available."),
            ),
            Self::TaskAccepted {
                task_title,
                volunteer_name,
            } => (
                "Task Accepted".to_string(),
                format!("Your task \"{task_title}\" has been accepted by {volunteer_name}."),
            ),
            Self::TaskCompleted {
                task_title,
                audience: CompletionAudience::Elderly,
            } => (
                "Task Completed".to_string(),
                format!(
                    "Your task \"{task_title}\" has been marked as completed. Please confirm and rate the volunteer."
                ),
            ),
            Self::TaskCompleted {
                task_title,
                audience: CompletionAudience::Volunteer,
            } => (
                "Task Completed".to_string(),
                format!(
                    "You have marked the task \"{task_title}\" as completed. Waiting for elderly confirmation."
                ),
            ),
            Self::TaskRated { task_title, rating } => (
                "Task Rated".to_string(),
                format!(
                    "The task \"{task_title}\" has been confirmed completed and you've received a rating of {rating}."
                ),
            ),
            Self::RatingReceived { task_title, rating } => (
                "New Rating Received".to_string(),
                format!("You received a new rating of {rating} for the task \"{task_title}\"."),
            ),
            Self::NewMessage { task_title } => (
                "New Message".to_string(),
                format!("You have a new message in task \"{task_title}\"."),
            ),
        }
    }

    /// Build the stored notification for `recipient`.
    pub fn to_notification(&self, recipient: UserId, task_id: Option<TaskId>) -> NewNotification {
        let (title, message) = self.render();
        NewNotification {
            user_id: recipient,
            kind: self.kind().to_string(),
            title,
            message,
            task_id,
        }
    }
}
