//! Logged-in user session and its persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_entity::user::{NewUser, User, UserFilter};

use crate::api::ApiClient;

/// The logged-in user. Passwords never reach the client side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(mut user: User) -> Self {
        user.password.clear();
        Self {
            user,
            logged_in_at: Utc::now(),
        }
    }
}

/// Where a session survives between runs.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    async fn load(&self) -> AppResult<Option<Session>>;
    async fn save(&self, session: &Session) -> AppResult<()>;
    async fn clear(&self) -> AppResult<()>;
}

/// Session kept as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A corrupt file is treated as logged out.
        match serde_json::from_slice(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local session, for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

/// Login, registration and logout against the API, persisted through a
/// [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The session saved by a previous run, if any.
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        self.store.load().await
    }

    /// Log in and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = self.api.login(username, password).await?;
        let session = Session::new(user);
        self.store.save(&session).await?;
        info!(user_id = %session.user.id, "Logged in");
        Ok(session)
    }

    /// Register, then start a session for the new user.
    ///
    /// Username and phone number are checked first so the user gets the
    /// specific message early; the server still enforces both.
    pub async fn register(&self, data: NewUser) -> AppResult<Session> {
        let by_username = UserFilter {
            username: Some(data.username.trim().to_string()),
            ..Default::default()
        };
        if !self.api.find_users(&by_username).await?.is_empty() {
            return Err(AppError::conflict("Username already exists"));
        }

        let by_phone = UserFilter {
            phone_number: Some(data.phone_number.trim().to_string()),
            ..Default::default()
        };
        if !self.api.find_users(&by_phone).await?.is_empty() {
            return Err(AppError::conflict("Phone number already in use"));
        }

        let user = self.api.register(&data).await?;
        let session = Session::new(user);
        self.store.save(&session).await?;
        info!(user_id = %session.user.id, "Registered");
        Ok(session)
    }

    /// Forget the saved session.
    pub async fn logout(&self) -> AppResult<()> {
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }
}
