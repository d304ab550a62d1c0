//! Registration, login and user lookup.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn registration(username: &str, phone: &str) -> serde_json::Value {
    json!({
        "username": username,
        "password": "secret",
        "userType": "volunteer",
        "firstName": "Lena",
        "lastName": "Park",
        "phoneNumber": phone,
        "transportation": ["Car"],
        "birthDate": "1990-04-12",
    })
}

#[tokio::test]
async fn test_register_hides_password() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/users", Some(registration("lena", "555-0001")))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.get("password").is_none());
    assert_eq!(response.body["userType"], "volunteer");
    assert_eq!(response.body["birthDate"], "1990-04-12");
    assert_eq!(response.body["transportation"], json!(["Car"]));
}

#[tokio::test]
async fn test_duplicate_username_rejected_before_insert() {
    let app = TestApp::new().await;
    app.request("POST", "/users", Some(registration("lena", "555-0001")))
        .await;

    let response = app
        .request("POST", "/users", Some(registration("lena", "555-0002")))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "Username already exists");

    let users = app.request("GET", "/users", None).await;
    assert_eq!(users.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_duplicate_phone_rejected() {
    let app = TestApp::new().await;
    app.request("POST", "/users", Some(registration("lena", "555-0001")))
        .await;

    let response = app
        .request("POST", "/users", Some(registration("omar", "555-0001")))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "Phone number already in use");
}

#[tokio::test]
async fn test_register_requires_phone() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/users", Some(registration("lena", "")))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION");
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    app.request("POST", "/users", Some(registration("lena", "555-0001")))
        .await;

    let ok = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "lena", "password": "secret" })),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["username"], "lena");
    assert!(ok.body.get("password").is_none());

    let wrong = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "lena", "password": "nope" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.code(), "AUTHENTICATION");

    let unknown = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "ghost", "password": "secret" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], wrong.body["error"]);
}

#[tokio::test]
async fn test_list_users_filters() {
    let app = TestApp::new().await;
    app.register("ana", "elderly").await;
    app.register("ben", "volunteer").await;
    app.register("cleo", "volunteer").await;

    let volunteers = app.request("GET", "/users?userType=volunteer", None).await;
    assert_eq!(volunteers.status, StatusCode::OK);
    assert_eq!(volunteers.body.as_array().map(Vec::len), Some(2));

    let by_phone = app.request("GET", "/users?phoneNumber=555-ana", None).await;
    assert_eq!(by_phone.body[0]["username"], "ana");

    let missing = app.request("GET", "/users?username=zed", None).await;
    assert_eq!(missing.body, json!([]));
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::new().await;
    let id = app.register("ana", "elderly").await;

    let found = app.request("GET", &format!("/users/{id}"), None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["firstName"], "Ana");
    assert!(found.body["averageRating"].is_null());

    let missing = app.request("GET", "/users/9999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_user_id() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/xyz", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION");
}
