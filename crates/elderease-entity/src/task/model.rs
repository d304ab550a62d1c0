//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use elderease_core::types::{TaskId, UserId};

use super::status::TaskStatus;

/// A help request created by an elderly user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Short summary.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// The requesting elderly user. Immutable after creation.
    pub elderly_id: UserId,
    /// The assigned volunteer; `None` while the task is open.
    #[serde(default)]
    pub volunteer_id: Option<UserId>,
    /// Lifecycle state.
    pub status: TaskStatus,
    /// Uploaded image file name.
    #[serde(default)]
    pub image: Option<String>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// Set on the transition into `Completed`.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the elderly owner confirmed completion.
    #[serde(default)]
    pub elderly_confirmed: bool,
    /// Rating given by the elderly owner.
    #[serde(default)]
    pub rating: Option<i32>,
    /// Whether the task has been archived.
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// Check if a user is the owner or the assigned volunteer.
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.elderly_id == user_id || self.volunteer_id == Some(user_id)
    }

    /// The other participant from `sender`'s point of view.
    ///
    /// Returns `None` when `sender` is the owner and no volunteer is
    /// assigned yet, or when `sender` is not a participant.
    pub fn counterpart_of(&self, sender: UserId) -> Option<UserId> {
        if sender == self.elderly_id {
            self.volunteer_id
        } else if self.volunteer_id == Some(sender) {
            Some(self.elderly_id)
        } else {
            None
        }
    }

    /// Whether the task can be archived right now.
    pub fn is_archivable(&self) -> bool {
        self.status == TaskStatus::Completed && self.elderly_confirmed
    }
}

/// Data required to create a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short summary.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// The requesting elderly user.
    pub elderly_id: UserId,
    /// Uploaded image file name.
    #[serde(default)]
    pub image: Option<String>,
}

/// Field edits allowed while a task is still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEdit {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New image file name.
    pub image: Option<String>,
}

impl TaskEdit {
    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image.is_none()
    }

    /// Apply the edit to a task in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(image) = &self.image {
            task.image = Some(image.clone());
        }
    }
}

/// Optional equality filters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Owner.
    pub elderly_id: Option<UserId>,
    /// Assigned volunteer.
    pub volunteer_id: Option<UserId>,
    /// Lifecycle state.
    pub status: Option<TaskStatus>,
    /// Archived flag.
    pub archived: Option<bool>,
}

impl TaskFilter {
    /// Check whether a task satisfies every set criterion.
    pub fn matches(&self, task: &Task) -> bool {
        self.elderly_id.is_none_or(|id| id == task.elderly_id)
            && self.volunteer_id.is_none_or(|id| Some(id) == task.volunteer_id)
            && self.status.is_none_or(|s| s == task.status)
            && self.archived.is_none_or(|a| a == task.archived)
    }
}
