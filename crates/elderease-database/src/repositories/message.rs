//! Message repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::TaskId;
use elderease_entity::message::{Message, NewMessage};

use crate::store::MessageStore;

/// Repository for task conversation messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn create(&self, data: &NewMessage) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (task_id, sender_id, sender_name, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.task_id)
        .bind(data.sender_id)
        .bind(data.sender_name.as_deref().unwrap_or_default())
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))
    }

    async fn list_by_task(&self, task_id: TaskId) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE task_id = $1 ORDER BY \"timestamp\" ASC, id ASC",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }
}
