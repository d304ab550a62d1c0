//! Bulk import of a legacy JSON dump (`{users, tasks, messages, notifications}`).
//!
//! Rows keep their source ids; id sequences are advanced past the
//! imported maximum afterwards so new inserts do not collide.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, warn};

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;
use elderease_core::types::{MessageId, NotificationId, TaskId, UserId};
use elderease_entity::task::TaskStatus;
use elderease_entity::user::{UserType, rating};

/// The full contents of a dump file.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub tasks: Vec<SeedTask>,
    #[serde(default)]
    pub messages: Vec<SeedMessage>,
    #[serde(default)]
    pub notifications: Vec<SeedNotification>,
}

/// A user record as exported by the legacy server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub user_type: UserType,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Either `YYYY-MM-DD` or a full timestamp.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub transportation: Vec<String>,
    #[serde(default)]
    pub ratings: Vec<i32>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// A task record as exported by the legacy server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub elderly_id: UserId,
    #[serde(default)]
    pub volunteer_id: Option<UserId>,
    pub status: TaskStatus,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub elderly_confirmed: bool,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub archived: bool,
}

/// A message record as exported by the legacy server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMessage {
    pub id: MessageId,
    pub task_id: TaskId,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A notification record as exported by the legacy server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedNotification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_kind() -> String {
    "general".to_string()
}

/// Row counts written by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub tasks: usize,
    pub messages: usize,
    pub notifications: usize,
}

impl SeedData {
    /// Parse a dump from a JSON string.
    pub fn from_json(source: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a dump file.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read seed file {}", path.display()),
                e,
            )
        })?;
        Self::from_json(&raw)
    }
}

/// Accept `1950-04-02` as well as `1950-04-02T00:00:00.000Z`.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn db_err(what: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, format!("Failed to seed {what}"), e)
}

/// Insert every record of `data` in one transaction.
pub async fn seed(pool: &PgPool, data: &SeedData) -> AppResult<SeedReport> {
    let mut tx = pool.begin().await.map_err(db_err("(begin transaction)"))?;

    for user in &data.users {
        insert_user(&mut tx, user).await?;
    }
    for task in &data.tasks {
        insert_task(&mut tx, task).await?;
    }
    for message in &data.messages {
        insert_message(&mut tx, message).await?;
    }
    for notification in &data.notifications {
        insert_notification(&mut tx, notification).await?;
    }

    for table in ["users", "tasks", "messages", "notifications"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE(MAX(id), 0) + 1, false) FROM {table}"
        ))
        .execute(&mut *tx)
        .await
        .map_err(db_err("sequences"))?;
    }

    tx.commit().await.map_err(db_err("(commit)"))?;

    let report = SeedReport {
        users: data.users.len(),
        tasks: data.tasks.len(),
        messages: data.messages.len(),
        notifications: data.notifications.len(),
    };
    info!(
        users = report.users,
        tasks = report.tasks,
        messages = report.messages,
        notifications = report.notifications,
        "Seed data imported"
    );
    Ok(report)
}

async fn insert_user(tx: &mut Transaction<'_, Postgres>, user: &SeedUser) -> AppResult<()> {
    let birth_date = user.birth_date.as_deref().and_then(|raw| {
        let parsed = parse_birth_date(raw);
        if parsed.is_none() {
            warn!(user_id = %user.id, raw, "Ignoring unparseable birth date");
        }
        parsed
    });
    let average = user.average_rating.or_else(|| rating::average(&user.ratings));

    sqlx::query(
        "INSERT INTO users (id, username, password, user_type, first_name, last_name, \
         phone_number, address, languages, birth_date, transportation, ratings, average_rating) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.password)
    .bind(user.user_type)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.phone_number)
    .bind(&user.address)
    .bind(&user.languages)
    .bind(birth_date)
    .bind(&user.transportation)
    .bind(&user.ratings)
    .bind(average)
    .execute(&mut **tx)
    .await
    .map_err(db_err("users"))?;
    Ok(())
}

async fn insert_task(tx: &mut Transaction<'_, Postgres>, task: &SeedTask) -> AppResult<()> {
    // Open tasks never carry a volunteer.
    let volunteer_id = match task.status {
        TaskStatus::Open => None,
        _ => task.volunteer_id,
    };
    sqlx::query(
        "INSERT INTO tasks (id, title, description, elderly_id, volunteer_id, status, image, \
         created_at, completed_at, elderly_confirmed, rating, archived) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.elderly_id)
    .bind(volunteer_id)
    .bind(task.status)
    .bind(task.image.as_deref())
    .bind(task.created_at.unwrap_or_else(Utc::now))
    .bind(task.completed_at)
    .bind(task.elderly_confirmed)
    .bind(task.rating)
    .bind(task.archived)
    .execute(&mut **tx)
    .await
    .map_err(db_err("tasks"))?;
    Ok(())
}

async fn insert_message(tx: &mut Transaction<'_, Postgres>, message: &SeedMessage) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO messages (id, task_id, sender_id, sender_name, content, \"timestamp\") \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(message.id)
    .bind(message.task_id)
    .bind(message.sender_id)
    .bind(&message.sender_name)
    .bind(&message.content)
    .bind(message.timestamp.unwrap_or_else(Utc::now))
    .execute(&mut **tx)
    .await
    .map_err(db_err("messages"))?;
    Ok(())
}

async fn insert_notification(
    tx: &mut Transaction<'_, Postgres>,
    notification: &SeedNotification,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO notifications (id, user_id, kind, title, message, task_id, read, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(notification.id)
    .bind(notification.user_id)
    .bind(&notification.kind)
    .bind(&notification.title)
    .bind(&notification.message)
    .bind(notification.task_id)
    .bind(notification.read)
    .bind(notification.created_at.unwrap_or_else(Utc::now))
    .execute(&mut **tx)
    .await
    .map_err(db_err("notifications"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_legacy_dump() {
        let data = SeedData::from_json(
            r#"{
                "users": [{
                    "id": 1, "username": "ana", "password": "pw", "userType": "elderly",
                    "firstName": "Ana", "lastName": "Lopez", "phoneNumber": "555",
                    "birthDate": "1941-07-30T00:00:00.000Z", "ratings": []
                }],
                "tasks": [{
                    "id": 5, "title": "Groceries", "elderlyId": 1, "status": "Open",
                    "createdAt": "2024-03-01T10:00:00.000Z"
                }],
                "notifications": [{
                    "id": 9, "userId": 1, "title": "Task Accepted", "message": "..."
                }]
            }"#,
        )
        .expect("parse");

        assert_eq!(data.users.len(), 1);
        assert_eq!(data.users[0].user_type, UserType::Elderly);
        assert_eq!(data.tasks[0].status, TaskStatus::Open);
        assert!(data.messages.is_empty());
        assert_eq!(data.notifications[0].kind, "general");
    }

    #[test]
    fn test_parse_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1941, 7, 30);
        assert_eq!(parse_birth_date("1941-07-30"), expected);
        assert_eq!(parse_birth_date("1941-07-30T00:00:00.000Z"), expected);
        assert_eq!(parse_birth_date("July 30"), None);
    }
}
