//! Task chat.

use axum::http::StatusCode;
use serde_json::json;

use elderease_core::types::UserId;

use crate::helpers::TestApp;

struct Chat {
    app: TestApp,
    elderly: i64,
    volunteer: i64,
    task: i64,
}

async fn accepted_task() -> Chat {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    let task = app.create_task(elderly, "Move the sofa").await;
    app.patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
        .await;
    Chat {
        app,
        elderly,
        volunteer,
        task,
    }
}

#[tokio::test]
async fn test_post_notifies_only_the_counterpart() {
    let Chat {
        app,
        elderly,
        volunteer,
        task,
    } = accepted_task().await;
    let elderly_before = app.notifications(elderly).await.len();
    let volunteer_before = app.notifications(volunteer).await.len();

    let response = app
        .request(
            "POST",
            &format!("/tasks/{task}/messages"),
            Some(json!({ "senderId": elderly, "content": "Thursday works?" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["senderName"], "Ana Tester");
    assert_eq!(response.body["taskId"], task);

    let volunteer_notes = app.notifications(volunteer).await;
    assert_eq!(volunteer_notes.len(), volunteer_before + 1);
    assert_eq!(volunteer_notes[0]["kind"], "new_message");
    assert_eq!(volunteer_notes[0]["taskId"], task);
    assert_eq!(app.notifications(elderly).await.len(), elderly_before);
}

#[tokio::test]
async fn test_messages_are_listed_oldest_first() {
    let Chat {
        app,
        elderly,
        volunteer,
        task,
    } = accepted_task().await;

    for (sender, content) in [(elderly, "Hello"), (volunteer, "Hi!"), (elderly, "See you")] {
        app.request(
            "POST",
            &format!("/tasks/{task}/messages"),
            Some(json!({ "senderId": sender, "senderName": "Nick", "content": content })),
        )
        .await;
    }

    let response = app
        .request("GET", &format!("/tasks/{task}/messages"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let contents: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["content"].as_str())
        .collect();
    assert_eq!(contents, vec!["Hello", "Hi!", "See you"]);
    assert_eq!(response.body[1]["senderName"], "Nick");

    let stored = app
        .stores
        .messages
        .list_by_task(task.into())
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[1].sender_id, UserId::new(volunteer));
}

#[tokio::test]
async fn test_rejected_messages() {
    let Chat { app, task, .. } = accepted_task().await;
    let outsider = app.register("zed", "volunteer").await;

    let stranger = app
        .request(
            "POST",
            &format!("/tasks/{task}/messages"),
            Some(json!({ "senderId": outsider, "content": "Can I help?" })),
        )
        .await;
    assert_eq!(stranger.status, StatusCode::BAD_REQUEST);

    let empty = app
        .request(
            "POST",
            &format!("/tasks/{task}/messages"),
            Some(json!({ "senderId": outsider, "content": "" })),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let unknown_task = app.request("GET", "/tasks/9999/messages", None).await;
    assert_eq!(unknown_task.status, StatusCode::NOT_FOUND);
}
