//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::UserId;
use elderease_entity::user::{NewUser, Rating, User, UserFilter, UserType};

use crate::store::UserStore;

/// Repository for user queries and writes.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, user_type, first_name, last_name, \
             phone_number, address, languages, birth_date, transportation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password)
        .bind(data.user_type)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(&data.languages)
        .bind(data.birth_date)
        .bind(&data.transportation)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict("Username already exists")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_phone_number_key") =>
            {
                AppError::conflict("Phone number already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by phone", e)
            })
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE ($1::text IS NULL OR username = $1) \
               AND ($2::text IS NULL OR phone_number = $2) \
               AND ($3::user_type IS NULL OR user_type = $3) \
             ORDER BY id ASC",
        )
        .bind(filter.username.as_deref())
        .bind(filter.phone_number.as_deref())
        .bind(filter.user_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn ids_by_type(&self, user_type: UserType) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE user_type = $1 ORDER BY id")
            .bind(user_type)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list user ids by type", e)
            })
    }

    async fn append_rating(&self, id: UserId, rating: Rating) -> AppResult<User> {
        // Both SET expressions read the pre-update `ratings`.
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
               ratings = array_append(ratings, $2), \
               average_rating = (SELECT AVG(r)::float8 FROM unnest(array_append(ratings, $2)) AS r), \
               updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(rating.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record rating", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
