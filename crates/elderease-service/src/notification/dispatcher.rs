//! Best-effort notification fan-out.
//!
//! Every write is independent. A failed write is logged and dropped so the
//! mutation that triggered it still succeeds.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use elderease_core::types::{TaskId, UserId};
use elderease_database::{NotificationStore, UserStore};
use elderease_entity::notification::{Notification, NotificationEvent};
use elderease_entity::user::UserType;

/// Turns [`NotificationEvent`]s into stored notifications.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(notifications: Arc<dyn NotificationStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            notifications,
            users,
        }
    }

    /// Notify one user. Returns the stored notification, or `None` if the
    /// write failed.
    pub async fn notify(
        &self,
        recipient: UserId,
        task_id: Option<TaskId>,
        event: &NotificationEvent,
    ) -> Option<Notification> {
        let data = event.to_notification(recipient, task_id);
        match self.notifications.create(&data).await {
            Ok(notification) => {
                debug!(
                    user_id = %recipient,
                    kind = event.kind(),
                    notification_id = %notification.id,
                    "Notification stored"
                );
                Some(notification)
            }
            Err(e) => {
                warn!(
                    user_id = %recipient,
                    kind = event.kind(),
                    error = %e,
                    "Failed to store notification"
                );
                None
            }
        }
    }

    /// Notify every user with `role`. Returns how many writes succeeded.
    pub async fn notify_role(
        &self,
        role: UserType,
        task_id: Option<TaskId>,
        event: &NotificationEvent,
    ) -> usize {
        let recipients = match self.users.ids_by_type(role).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(role = %role, error = %e, "Failed to resolve notification recipients");
                return 0;
            }
        };

        join_all(
            recipients
                .into_iter()
                .map(|recipient| self.notify(recipient, task_id, event)),
        )
        .await
        .into_iter()
        .flatten()
        .count()
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher").finish_non_exhaustive()
    }
}
