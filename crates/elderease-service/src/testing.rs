//! Failing store doubles shared by the service tests.

use std::sync::Arc;

use async_trait::async_trait;

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_core::types::{NotificationId, UserId};
use elderease_database::{NotificationStore, UserStore};
use elderease_entity::notification::{NewNotification, Notification};
use elderease_entity::user::{NewUser, Rating, User, UserFilter, UserType};

/// Rejects every write.
pub(crate) struct BrokenNotificationStore;

#[async_trait]
impl NotificationStore for BrokenNotificationStore {
    async fn create(&self, _data: &NewNotification) -> AppResult<Notification> {
        Err(AppError::database("connection reset"))
    }
    async fn list_by_user(&self, _user_id: UserId) -> AppResult<Vec<Notification>> {
        Ok(Vec::new())
    }
    async fn mark_read(&self, _id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(None)
    }
    async fn unread_count(&self, _user_id: UserId) -> AppResult<i64> {
        Ok(0)
    }
    async fn mark_all_read(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(0)
    }
}

/// Delegates to `inner` but fails every `append_rating`.
pub(crate) struct RatingWriteFails(pub Arc<dyn UserStore>);

#[async_trait]
impl UserStore for RatingWriteFails {
    async fn create(&self, data: &NewUser) -> AppResult<User> {
        self.0.create(data).await
    }
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.0.find_by_id(id).await
    }
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.0.find_by_username(username).await
    }
    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        self.0.find_by_phone(phone_number).await
    }
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        self.0.list(filter).await
    }
    async fn ids_by_type(&self, user_type: UserType) -> AppResult<Vec<UserId>> {
        self.0.ids_by_type(user_type).await
    }
    async fn append_rating(&self, _id: UserId, _rating: Rating) -> AppResult<User> {
        Err(AppError::database("statement timeout"))
    }
}
