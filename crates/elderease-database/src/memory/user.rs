//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_core::types::UserId;
use elderease_entity::user::{NewUser, Rating, User, UserFilter, UserType};

use super::IdSequence;
use crate::store::UserStore;

/// User store held in process memory.
#[derive(Debug)]
pub struct MemoryUserStore {
    users: DashMap<UserId, User>,
    ids: IdSequence,
    /// Serializes the uniqueness check with the insert.
    create_lock: Mutex<()>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            ids: IdSequence::new(),
            create_lock: Mutex::new(()),
        }
    }

    fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let _guard = self.create_lock.lock().await;

        if self.find_where(|u| u.username == data.username).is_some() {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.find_where(|u| u.phone_number == data.phone_number).is_some() {
            return Err(AppError::conflict("Phone number already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(self.ids.next()),
            username: data.username.clone(),
            password: data.password.clone(),
            user_type: data.user_type,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            phone_number: data.phone_number.clone(),
            address: data.address.clone(),
            languages: data.languages.clone(),
            birth_date: data.birth_date,
            transportation: data.transportation.clone(),
            ratings: Vec::new(),
            average_rating: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.find_where(|u| u.username == username))
    }

    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        Ok(self.find_where(|u| u.phone_number == phone_number))
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn ids_by_type(&self, user_type: UserType) -> AppResult<Vec<UserId>> {
        let mut ids: Vec<UserId> = self
            .users
            .iter()
            .filter(|entry| entry.value().user_type == user_type)
            .map(|entry| *entry.key())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn append_rating(&self, id: UserId, rating: Rating) -> AppResult<User> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        entry.record_rating(rating);
        Ok(entry.value().clone())
    }
}
