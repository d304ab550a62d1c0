//! Store traits and the backend bundle handed to the service layer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use elderease_core::config::{DatabaseBackend, DatabaseConfig};
use elderease_core::result::AppResult;
use elderease_core::types::{NotificationId, TaskId, UserId};
use elderease_entity::message::{Message, NewMessage};
use elderease_entity::notification::{NewNotification, Notification};
use elderease_entity::task::{NewTask, Task, TaskFilter, TaskStatus};
use elderease_entity::user::{NewUser, Rating, User, UserFilter, UserType};

use crate::connection::DatabasePool;
use crate::memory::{
    MemoryMessageStore, MemoryNotificationStore, MemoryTaskStore, MemoryUserStore,
};
use crate::migration::run_migrations;
use crate::repositories::{
    MessageRepository, NotificationRepository, TaskRepository, UserRepository,
};

/// Persistence operations on users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user. Fails with `Conflict` on a duplicate username or phone number.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by exact phone number.
    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>>;

    /// List users matching every set filter field, oldest first.
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Ids of every user with the given role.
    async fn ids_by_type(&self, user_type: UserType) -> AppResult<Vec<UserId>>;

    /// Append a rating and recompute the average in one write.
    ///
    /// Fails with `NotFound` when the user does not exist.
    async fn append_rating(&self, id: UserId, rating: Rating) -> AppResult<User>;
}

/// Persistence operations on tasks.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Insert a new task in the `Open` state.
    async fn create(&self, data: &NewTask) -> AppResult<Task>;

    /// Find a task by primary key.
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>>;

    /// List tasks matching every set filter field, newest first.
    async fn list(&self, filter: &TaskFilter) -> AppResult<Vec<Task>>;

    /// Overwrite the mutable fields of `task`, but only if the stored row
    /// is still in `expected` status.
    ///
    /// Returns `None` when the task is missing or its status moved on.
    async fn update_if_status(&self, task: &Task, expected: TaskStatus)
    -> AppResult<Option<Task>>;
}

/// Persistence operations on task messages.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Insert a message. `sender_name` must already be resolved.
    async fn create(&self, data: &NewMessage) -> AppResult<Message>;

    /// Messages of a task, oldest first.
    async fn list_by_task(&self, task_id: TaskId) -> AppResult<Vec<Message>>;
}

/// Persistence operations on notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Insert a notification.
    async fn create(&self, data: &NewNotification) -> AppResult<Notification>;

    /// Notifications of a user, newest first.
    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>>;

    /// Set `read = true`. Returns `None` for an unknown id.
    async fn mark_read(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Number of unread notifications of a user.
    async fn unread_count(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark every notification of a user read, returning how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;
}

/// The four stores of one backend, shared behind `Arc`.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub messages: Arc<dyn MessageStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            tasks: Arc::new(TaskRepository::new(pg.clone())),
            messages: Arc::new(MessageRepository::new(pg.clone())),
            notifications: Arc::new(NotificationRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            tasks: Arc::new(MemoryTaskStore::new()),
            messages: Arc::new(MemoryMessageStore::new()),
            notifications: Arc::new(MemoryNotificationStore::new()),
            pool: None,
        }
    }

    /// Build the backend selected in configuration, running migrations
    /// when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory stores; data is lost on shutdown");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> DatabaseBackend {
        if self.pool.is_some() {
            DatabaseBackend::Postgres
        } else {
            DatabaseBackend::Memory
        }
    }

    /// The PostgreSQL pool, if this is the PostgreSQL backend.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Check backend connectivity. The memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend())
            .finish()
    }
}
