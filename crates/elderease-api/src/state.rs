//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use elderease_core::config::AppConfig;
use elderease_database::Stores;
use elderease_service::{
    MessageService, NotificationService, RatingService, Services, TaskService, UserService,
};
use elderease_storage::LocalUploadStore;

/// Application state shared across all handlers via Axum's `State` extractor.
///
/// Every field is cheap to clone (`Arc` or handle types).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store handles, kept for health checks.
    pub stores: Stores,
    /// Upload directory.
    pub uploads: Arc<LocalUploadStore>,

    pub user_service: Arc<UserService>,
    pub task_service: Arc<TaskService>,
    pub message_service: Arc<MessageService>,
    pub notification_service: Arc<NotificationService>,
    pub rating_service: Arc<RatingService>,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: Stores, uploads: LocalUploadStore) -> Self {
        let services = Services::new(&stores);
        Self {
            config: Arc::new(config),
            stores,
            uploads: Arc::new(uploads),
            user_service: services.users,
            task_service: services.tasks,
            message_service: services.messages,
            notification_service: services.notifications,
            rating_service: services.ratings,
        }
    }
}
