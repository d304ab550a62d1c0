//! User registration, login and lookup.

use std::sync::Arc;

use tracing::{info, warn};

use elderease_core::error::AppError;
use elderease_core::types::UserId;
use elderease_database::UserStore;
use elderease_entity::user::{NewUser, User, UserFilter};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Handles user accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Register a user.
    ///
    /// Duplicate usernames and phone numbers are rejected before anything is
    /// written; the store's unique constraints back this up under races.
    pub async fn register(&self, data: NewUser) -> Result<User, AppError> {
        let data = data.normalized();
        if data.username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if data.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        if data.phone_number.is_empty() {
            return Err(AppError::validation("Phone number is required"));
        }

        if self.users.find_by_username(&data.username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.users.find_by_phone(&data.phone_number).await?.is_some() {
            return Err(AppError::conflict("Phone number already in use"));
        }

        let user = self.users.create(&data).await?;
        info!(
            user_id = %user.id,
            username = %user.username,
            user_type = %user.user_type,
            "User registered"
        );
        Ok(user)
    }

    /// Check credentials by plain comparison.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) if user.password == password => user,
            _ => {
                warn!(username = %username, "Login failed");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// List users matching the filter.
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        self.users.list(filter).await
    }

    /// Fetch a user.
    pub async fn get(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
