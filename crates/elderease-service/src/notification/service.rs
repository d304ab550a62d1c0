//! Notification listing and read tracking.

use std::sync::Arc;

use tracing::info;

use elderease_core::error::AppError;
use elderease_core::types::{NotificationId, UserId};
use elderease_database::NotificationStore;
use elderease_entity::notification::Notification;

/// Read-side operations on a user's notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Notifications of a user, newest first.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Notification>, AppError> {
        self.notifications.list_by_user(user_id).await
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, AppError> {
        self.notifications
            .mark_read(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self, user_id: UserId) -> Result<i64, AppError> {
        self.notifications.unread_count(user_id).await
    }

    /// Marks all of a user's notifications as read.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<u64, AppError> {
        let marked = self.notifications.mark_all_read(user_id).await?;
        info!(user_id = %user_id, marked, "Marked notifications read");
        Ok(marked)
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish_non_exhaustive()
    }
}
