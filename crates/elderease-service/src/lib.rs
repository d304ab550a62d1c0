//! # elderease-service
//!
//! Business logic for ElderEase. Each service owns the store handles it
//! needs (constructor injection through `Arc`) and implements one group of
//! use cases. Notification fan-out is centralized in
//! [`NotificationDispatcher`], which never fails the calling mutation.

pub mod message;
pub mod notification;
pub mod task;
pub mod user;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use elderease_database::Stores;

pub use message::MessageService;
pub use notification::{NotificationDispatcher, NotificationService};
pub use task::{TaskCommand, TaskService, TaskUpdate};
pub use user::{RatingService, UserService};

/// Every service, wired against one set of stores.
#[derive(Debug, Clone)]
pub struct Services {
    pub users: Arc<UserService>,
    pub tasks: Arc<TaskService>,
    pub messages: Arc<MessageService>,
    pub notifications: Arc<NotificationService>,
    pub ratings: Arc<RatingService>,
}

impl Services {
    /// Build all services over `stores`.
    pub fn new(stores: &Stores) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&stores.notifications),
            Arc::clone(&stores.users),
        ));
        let ratings = Arc::new(RatingService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.tasks),
            Arc::clone(&dispatcher),
        ));

        Self {
            users: Arc::new(UserService::new(Arc::clone(&stores.users))),
            tasks: Arc::new(TaskService::new(
                Arc::clone(&stores.tasks),
                Arc::clone(&stores.users),
                Arc::clone(&dispatcher),
                Arc::clone(&ratings),
            )),
            messages: Arc::new(MessageService::new(
                Arc::clone(&stores.messages),
                Arc::clone(&stores.tasks),
                Arc::clone(&stores.users),
                Arc::clone(&dispatcher),
            )),
            notifications: Arc::new(NotificationService::new(Arc::clone(
                &stores.notifications,
            ))),
            ratings,
        }
    }
}
