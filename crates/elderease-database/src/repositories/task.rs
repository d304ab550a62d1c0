//! Task repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::TaskId;
use elderease_entity::task::{NewTask, Task, TaskFilter, TaskStatus};

use crate::store::TaskStore;

/// Repository for task queries and status transitions.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn create(&self, data: &NewTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, elderly_id, image, status) \
             VALUES ($1, $2, $3, $4, 'Open') \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.elderly_id)
        .bind(data.image.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    async fn list(&self, filter: &TaskFilter) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks \
             WHERE ($1::bigint IS NULL OR elderly_id = $1) \
               AND ($2::bigint IS NULL OR volunteer_id = $2) \
               AND ($3::task_status IS NULL OR status = $3) \
               AND ($4::boolean IS NULL OR archived = $4) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(filter.elderly_id)
        .bind(filter.volunteer_id)
        .bind(filter.status)
        .bind(filter.archived)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET \
               title = $2, description = $3, volunteer_id = $4, status = $5, image = $6, \
               completed_at = $7, elderly_confirmed = $8, rating = $9, archived = $10 \
             WHERE id = $1 AND status = $11 \
             RETURNING *",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.volunteer_id)
        .bind(task.status)
        .bind(task.image.as_deref())
        .bind(task.completed_at)
        .bind(task.elderly_confirmed)
        .bind(task.rating)
        .bind(task.archived)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))
    }
}
