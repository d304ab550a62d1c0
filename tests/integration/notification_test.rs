//! Notification reads and counters.

use axum::http::StatusCode;

use crate::helpers::TestApp;

async fn volunteer_with_two_notifications() -> (TestApp, i64) {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    app.create_task(elderly, "Groceries").await;
    app.create_task(elderly, "Pharmacy").await;
    (app, volunteer)
}

#[tokio::test]
async fn test_newest_first_with_rendered_text() {
    let (app, volunteer) = volunteer_with_two_notifications().await;

    let notes = app.notifications(volunteer).await;
    assert_eq!(notes.len(), 2);
    assert!(notes[0]["message"].as_str().unwrap().contains("Pharmacy"));
    assert!(notes[1]["message"].as_str().unwrap().contains("Groceries"));
    assert!(notes[0]["title"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_mark_read_and_counts() {
    let (app, volunteer) = volunteer_with_two_notifications().await;

    let count = app
        .request(
            "GET",
            &format!("/notifications/unread-count?userId={volunteer}"),
            None,
        )
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["count"], 2);

    let first = app.notifications(volunteer).await[0]["id"].as_i64().unwrap();
    let marked = app
        .request("PATCH", &format!("/notifications/{first}"), None)
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.body["read"], true);

    let count = app
        .request(
            "GET",
            &format!("/notifications/unread-count?userId={volunteer}"),
            None,
        )
        .await;
    assert_eq!(count.body["count"], 1);

    let all = app
        .request(
            "PATCH",
            &format!("/notifications/read-all?userId={volunteer}"),
            None,
        )
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["marked"], 1);

    assert!(
        app.notifications(volunteer)
            .await
            .iter()
            .all(|n| n["read"] == true)
    );
}

#[tokio::test]
async fn test_unknown_notification_and_missing_user() {
    let app = TestApp::new().await;

    let missing = app.request("PATCH", "/notifications/777", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let no_user = app.request("GET", "/notifications", None).await;
    assert_eq!(no_user.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_user.code(), "VALIDATION");
    assert!(no_user.body["error"].as_str().unwrap().contains("userId"));

    let bad_id = app.request("PATCH", "/notifications/first", None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.code(), "VALIDATION");

    let empty = app.notifications(12345).await;
    assert!(empty.is_empty());
}
