//! The typed client against a live server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use elderease_api::{AppState, build_app};
use elderease_client::{
    ApiClient, ClientConfig, MemorySessionStore, MessageFeed, NotificationFeed, SessionManager,
};
use elderease_core::config::AppConfig;
use elderease_core::error::ErrorKind;
use elderease_core::types::UserId;
use elderease_database::Stores;
use elderease_entity::message::NewMessage;
use elderease_entity::task::{NewTask, TaskStatus};
use elderease_entity::user::{NewUser, User, UserType};
use elderease_service::TaskUpdate;
use elderease_storage::LocalUploadStore;

async fn spawn_server() -> (ApiClient, TempDir) {
    let upload_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.uploads.directory = upload_dir.path().to_string_lossy().into_owned();
    let uploads = LocalUploadStore::new(&config.uploads).await.unwrap();
    let app = build_app(AppState::new(config, Stores::memory(), uploads));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (client, upload_dir)
}

fn new_user(username: &str, user_type: UserType) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "pw".to_string(),
        user_type,
        first_name: username.to_string(),
        last_name: "Client".to_string(),
        phone_number: format!("555-{username}"),
        address: String::new(),
        languages: vec![],
        birth_date: None,
        transportation: vec![],
    }
}

async fn register(api: &ApiClient, username: &str, user_type: UserType) -> User {
    api.register(&new_user(username, user_type)).await.unwrap()
}

#[tokio::test]
async fn test_session_manager_flow() {
    let (api, _dir) = spawn_server().await;
    let sessions = SessionManager::new(api, Arc::new(MemorySessionStore::new()));

    assert!(sessions.restore().await.unwrap().is_none());

    let session = sessions
        .register(new_user("rita", UserType::Volunteer))
        .await
        .unwrap();
    assert_eq!(session.user.username, "rita");
    assert!(session.user.password.is_empty());
    assert_eq!(
        sessions.restore().await.unwrap().map(|s| s.user.id),
        Some(session.user.id)
    );

    let duplicate = sessions
        .register(new_user("rita", UserType::Volunteer))
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind, ErrorKind::Conflict);
    assert_eq!(duplicate.message, "Username already exists");

    sessions.logout().await.unwrap();
    assert!(sessions.restore().await.unwrap().is_none());

    let wrong = sessions.login("rita", "nope").await.unwrap_err();
    assert_eq!(wrong.kind, ErrorKind::Authentication);
    assert!(sessions.restore().await.unwrap().is_none());

    let again = sessions.login("rita", "pw").await.unwrap();
    assert_eq!(again.user.id, session.user.id);
}

#[tokio::test]
async fn test_task_calls_and_error_kinds() {
    let (api, _dir) = spawn_server().await;
    assert!(api.health().await.unwrap());

    let elderly = register(&api, "olga", UserType::Elderly).await;
    let volunteer = register(&api, "vic", UserType::Volunteer).await;

    let task = api
        .create_task(&NewTask {
            title: "Bring groceries".into(),
            description: String::new(),
            elderly_id: elderly.id,
            image: None,
        })
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Open);

    let accepted = api
        .update_task(
            task.id,
            &TaskUpdate {
                status: Some(TaskStatus::Accepted),
                volunteer_id: Some(volunteer.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(accepted.volunteer_id, Some(volunteer.id));

    let mine = api.tasks_for(&volunteer).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(api.get_task(task.id).await.unwrap().status, TaskStatus::Accepted);

    let refused = api.archive_task(task.id).await.unwrap_err();
    assert_eq!(refused.kind, ErrorKind::InvalidTransition);

    let missing = api.get_user(UserId::new(999)).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);

    let file = api.upload_image("aGVsbG8=").await.unwrap();
    assert!(api.upload_url(&file).unwrap().as_str().ends_with(&file));
}

#[tokio::test]
async fn test_notification_feed_sees_new_task() {
    let (api, _dir) = spawn_server().await;
    let elderly = register(&api, "olga", UserType::Elderly).await;
    let volunteer = register(&api, "vic", UserType::Volunteer).await;

    let feed = NotificationFeed::start(api.clone(), volunteer.id, Duration::from_millis(100));
    let mut rx = feed.subscribe();

    api.create_task(&NewTask {
        title: "Walk the dog".into(),
        description: String::new(),
        elderly_id: elderly.id,
        image: None,
    })
    .await
    .unwrap();

    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.unread == 1))
        .await
        .expect("feed did not update in time")
        .unwrap()
        .clone();
    assert_eq!(snapshot.notifications[0].kind, "task_available");

    api.mark_all_read(volunteer.id).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.unread == 0))
        .await
        .expect("feed did not see read state")
        .unwrap();
    assert_eq!(feed.latest().notifications.len(), 1);
}

#[tokio::test]
async fn test_message_feed_picks_up_posts() {
    let (api, _dir) = spawn_server().await;
    let elderly = register(&api, "olga", UserType::Elderly).await;
    let volunteer = register(&api, "vic", UserType::Volunteer).await;
    let task = api
        .create_task(&NewTask {
            title: "Fix the sink".into(),
            description: String::new(),
            elderly_id: elderly.id,
            image: None,
        })
        .await
        .unwrap();
    api.update_task(
        task.id,
        &TaskUpdate {
            status: Some(TaskStatus::Accepted),
            volunteer_id: Some(volunteer.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let feed = MessageFeed::start(api.clone(), task.id, Duration::from_millis(100));
    let mut rx = feed.subscribe();

    api.post_message(&NewMessage {
        task_id: task.id,
        sender_id: volunteer.id,
        sender_name: None,
        content: "On my way".into(),
    })
    .await
    .unwrap();

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|m| m.len() == 1))
        .await
        .expect("feed did not update in time")
        .unwrap();
    let messages = feed.latest();
    assert_eq!(messages[0].content, "On my way");
    assert_eq!(messages[0].sender_name, "vic Client");
}
