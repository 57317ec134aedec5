mod common;

use axum::http::StatusCode;
use common::create_test_app;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_success() {
    let app = create_test_app();

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "long-enough" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_i64().is_some());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = create_test_app();
    let payload = json!({ "username": "alice", "password": "long-enough" });

    app.server
        .post("/auth/register")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.post("/auth/register").json(&payload).await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Username already exists"
    );
}

#[tokio::test]
async fn test_register_validation() {
    let app = create_test_app();

    app.server
        .post("/auth/register")
        .json(&json!({ "username": "al", "password": "long-enough" }))
        .await
        .assert_status_bad_request();

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "short" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["details"]["password"].is_array());
}
