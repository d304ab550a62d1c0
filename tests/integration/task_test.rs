//! Task creation, lifecycle transitions and listing.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn kinds(notifications: &[serde_json::Value]) -> Vec<&str> {
    notifications
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect()
}

#[tokio::test]
async fn test_create_task_broadcasts_to_every_volunteer() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteers = [
        app.register("ben", "volunteer").await,
        app.register("cleo", "volunteer").await,
        app.register("dev", "volunteer").await,
    ];

    let response = app
        .request(
            "POST",
            "/tasks",
            Some(json!({ "title": "Pick up groceries", "elderlyId": elderly })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "Open");
    assert!(response.body["volunteerId"].is_null());
    assert_eq!(response.body["archived"], false);
    let task_id = response.id();

    for volunteer in volunteers {
        let notes = app.notifications(volunteer).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["kind"], "task_available");
        assert_eq!(notes[0]["taskId"], task_id);
        assert_eq!(notes[0]["read"], false);
    }
    assert!(app.notifications(elderly).await.is_empty());
}

#[tokio::test]
async fn test_create_task_validation() {
    let app = TestApp::new().await;
    let volunteer = app.register("ben", "volunteer").await;

    let blank = app
        .request("POST", "/tasks", Some(json!({ "title": "", "elderlyId": 1 })))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let not_elderly = app
        .request(
            "POST",
            "/tasks",
            Some(json!({ "title": "Walk", "elderlyId": volunteer })),
        )
        .await;
    assert_eq!(not_elderly.status, StatusCode::BAD_REQUEST);

    let unknown_owner = app
        .request(
            "POST",
            "/tasks",
            Some(json!({ "title": "Walk", "elderlyId": 4242 })),
        )
        .await;
    assert_eq!(unknown_owner.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("POST", "/tasks", Some(json!({ "title": 7 })))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.code(), "VALIDATION");
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    let task = app.create_task(elderly, "Fix the fence").await;

    // Accept
    let accepted = app
        .patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.body["status"], "Accepted");
    assert_eq!(accepted.body["volunteerId"], volunteer);
    assert_eq!(kinds(&app.notifications(elderly).await), vec!["task_accepted"]);

    // Complete: both parties hear about it
    let completed = app.patch_task(task, json!({ "status": "Completed" })).await;
    assert_eq!(completed.status, StatusCode::OK);
    assert!(completed.body["completedAt"].is_string());
    assert_eq!(
        kinds(&app.notifications(elderly).await),
        vec!["task_completed", "task_accepted"]
    );
    assert_eq!(
        kinds(&app.notifications(volunteer).await),
        vec!["task_completed", "task_available"]
    );

    // Confirm with a rating
    let confirmed = app
        .patch_task(task, json!({ "elderlyConfirmed": true, "rating": 4 }))
        .await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.body["elderlyConfirmed"], true);
    assert_eq!(confirmed.body["rating"], 4);

    let rated = app.request("GET", &format!("/users/{volunteer}"), None).await;
    assert_eq!(rated.body["ratings"], json!([4]));
    assert_eq!(rated.body["averageRating"], 4.0);
    assert_eq!(app.notifications(volunteer).await[0]["kind"], "task_rated");

    // Archive
    let archived = app
        .request("PATCH", &format!("/tasks/{task}/archive"), None)
        .await;
    assert_eq!(archived.status, StatusCode::OK);
    assert_eq!(archived.body["status"], "Archived");
    assert_eq!(archived.body["archived"], true);
}

#[tokio::test]
async fn test_completion_produces_two_notifications() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    let task = app.create_task(elderly, "Carry boxes").await;
    app.patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
        .await;

    let before = app.notifications(elderly).await.len() + app.notifications(volunteer).await.len();
    app.patch_task(task, json!({ "status": "Completed" })).await;
    let after = app.notifications(elderly).await.len() + app.notifications(volunteer).await.len();

    assert_eq!(after - before, 2);
}

#[tokio::test]
async fn test_archive_requires_confirmation() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    let task = app.create_task(elderly, "Read mail").await;

    let open = app
        .request("PATCH", &format!("/tasks/{task}/archive"), None)
        .await;
    assert_eq!(open.status, StatusCode::CONFLICT);
    assert_eq!(open.code(), "INVALID_TRANSITION");

    app.patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
        .await;
    app.patch_task(task, json!({ "status": "Completed" })).await;

    let unconfirmed = app
        .request("PATCH", &format!("/tasks/{task}/archive"), None)
        .await;
    assert_eq!(unconfirmed.status, StatusCode::CONFLICT);

    // Confirm, rate and archive in one request
    let archived = app
        .patch_task(task, json!({ "status": "Archived", "rating": 5 }))
        .await;
    assert_eq!(archived.status, StatusCode::OK);
    assert_eq!(archived.body["archived"], true);
    assert_eq!(archived.body["elderlyConfirmed"], true);
    assert_eq!(archived.body["rating"], 5);
}

#[tokio::test]
async fn test_reset_clears_volunteer() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;
    let task = app.create_task(elderly, "Water plants").await;
    app.patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
        .await;

    let reset = app.patch_task(task, json!({ "status": "Open" })).await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(reset.body["status"], "Open");
    assert!(reset.body["volunteerId"].is_null());
}

#[tokio::test]
async fn test_invalid_updates() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let other_elderly = app.register("bea", "elderly").await;
    let task = app.create_task(elderly, "Cook dinner").await;

    let not_volunteer = app
        .patch_task(task, json!({ "status": "Accepted", "volunteerId": other_elderly }))
        .await;
    assert_eq!(not_volunteer.status, StatusCode::BAD_REQUEST);

    let missing_volunteer = app.patch_task(task, json!({ "status": "Accepted" })).await;
    assert_eq!(missing_volunteer.status, StatusCode::BAD_REQUEST);

    let skip_ahead = app.patch_task(task, json!({ "status": "Completed" })).await;
    assert_eq!(skip_ahead.status, StatusCode::CONFLICT);

    let out_of_range = app
        .patch_task(task, json!({ "elderlyConfirmed": true, "rating": 9 }))
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let empty = app.patch_task(task, json!({})).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let unknown = app.patch_task(9999, json!({ "status": "Completed" })).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_and_cancel_open_task() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let task = app.create_task(elderly, "Groceries").await;

    let edited = app
        .patch_task(task, json!({ "title": "Groceries and pharmacy" }))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "Groceries and pharmacy");

    let cancelled = app.patch_task(task, json!({ "status": "Cancelled" })).await;
    assert_eq!(cancelled.body["status"], "Cancelled");

    let again = app.patch_task(task, json!({ "status": "Cancelled" })).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    let ana = app.register("ana", "elderly").await;
    let bea = app.register("bea", "elderly").await;
    let ben = app.register("ben", "volunteer").await;
    let first = app.create_task(ana, "First").await;
    let second = app.create_task(ana, "Second").await;
    app.create_task(bea, "Third").await;
    app.patch_task(first, json!({ "status": "Accepted", "volunteerId": ben }))
        .await;

    let all = app.request("GET", "/tasks", None).await;
    assert_eq!(all.body.as_array().map(Vec::len), Some(3));

    let mine = app
        .request("GET", &format!("/tasks?userId={ana}&userType=elderly"), None)
        .await;
    let ids: Vec<i64> = mine
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let assigned = app
        .request("GET", &format!("/tasks?userId={ben}&userType=volunteer"), None)
        .await;
    assert_eq!(assigned.body.as_array().map(Vec::len), Some(1));
    assert_eq!(assigned.body[0]["id"], first);

    let open = app.request("GET", "/tasks?status=Open", None).await;
    assert_eq!(open.body.as_array().map(Vec::len), Some(2));

    let bad_status = app.request("GET", "/tasks?status=Sleeping", None).await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);

    let fetched = app.request("GET", &format!("/tasks/{second}"), None).await;
    assert_eq!(fetched.body["title"], "Second");

    let missing = app.request("GET", "/tasks/9999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_volunteer_endpoint() {
    let app = TestApp::new().await;
    let elderly = app.register("ana", "elderly").await;
    let volunteer = app.register("ben", "volunteer").await;

    let mut ratings = Vec::new();
    for (title, rating) in [("One", 5), ("Two", 3), ("Three", 4)] {
        let task = app.create_task(elderly, title).await;
        app.patch_task(task, json!({ "status": "Accepted", "volunteerId": volunteer }))
            .await;
        app.patch_task(task, json!({ "status": "Completed" })).await;
        app.patch_task(task, json!({ "elderlyConfirmed": true })).await;

        let response = app
            .request(
                "PATCH",
                &format!("/users/{volunteer}/rate"),
                Some(json!({ "rating": rating, "taskId": task })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        ratings.push(rating);

        // Rating the same task twice is refused
        let twice = app
            .request(
                "PATCH",
                &format!("/users/{volunteer}/rate"),
                Some(json!({ "rating": rating, "taskId": task })),
            )
            .await;
        assert_eq!(twice.status, StatusCode::CONFLICT);
    }

    let user = app.request("GET", &format!("/users/{volunteer}"), None).await;
    assert_eq!(user.body["ratings"], json!(ratings));
    assert_eq!(user.body["averageRating"], 4.0);
}

#[tokio::test]
async fn test_malformed_path_and_query_are_json_errors() {
    let app = TestApp::new().await;

    let bad_id = app
        .request("PATCH", "/tasks/abc", Some(json!({ "status": "Completed" })))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.code(), "VALIDATION");
    assert!(bad_id.body["error"].is_string());

    let bad_flag = app.request("GET", "/tasks?archived=maybe", None).await;
    assert_eq!(bad_flag.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_flag.code(), "VALIDATION");

    let bad_messages = app.request("GET", "/tasks/seven/messages", None).await;
    assert_eq!(bad_messages.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_messages.code(), "VALIDATION");
}
