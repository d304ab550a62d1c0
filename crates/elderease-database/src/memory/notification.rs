//! In-memory notification store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use elderease_core::result::AppResult;
use elderease_core::types::{NotificationId, UserId};
use elderease_entity::notification::{NewNotification, Notification};

use super::IdSequence;
use crate::store::NotificationStore;

/// Notification store held in process memory.
#[derive(Debug)]
pub struct MemoryNotificationStore {
    notifications: DashMap<NotificationId, Notification>,
    ids: IdSequence,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            notifications: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        let notification = Notification {
            id: NotificationId::new(self.ids.next()),
            user_id: data.user_id,
            kind: data.kind.clone(),
            title: data.title.clone(),
            message: data.message.clone(),
            task_id: data.task_id,
            read: false,
            created_at: Utc::now(),
        };
        self.notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let mut list: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get_mut(&id).map(|mut entry| {
            entry.read = true;
            entry.value().clone()
        }))
    }

    async fn unread_count(&self, user_id: UserId) -> AppResult<i64> {
        let count = self
            .notifications
            .iter()
            .filter(|entry| entry.value().user_id == user_id && !entry.value().read)
            .count();
        Ok(count as i64)
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut changed = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.user_id == user_id && !entry.read {
                entry.read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
