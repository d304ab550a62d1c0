//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::{NotificationId, UserId};
use elderease_entity::notification::{NewNotification, Notification};

use crate::store::NotificationStore;

/// Repository for user notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, kind, title, message, task_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.kind)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.task_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })
    }

    async fn unread_count(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark notifications read", e)
            })
    }
}
