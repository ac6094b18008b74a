//! Integration tests for authentication endpoints against Postgres

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let body = json!({
        "name": "Alice",
        "email": common::unique_email("register"),
        "password": "pw123"
    });

    let (status, response) = app.post("/api/auth/register", &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["message"], "User registered successfully");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "name": "Alice",
        "email": common::unique_email("duplicate"),
        "password": "pw123"
    });

    let (status, _) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/api/auth/register", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "USER_EXISTS");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_duplicate_registration_hits_unique_constraint() {
    let app = std::sync::Arc::new(common::TestApp::new().await);
    let email = common::unique_email("race");

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let app = app.clone();
            let body = json!({"name": format!("Racer{}", i), "email": email, "password": "pw123"});
            tokio::spawn(async move { app.post("/api/auth/register", &body).await.0 })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success_and_profile() {
    let app = common::TestApp::new().await;
    let email = common::unique_email("login");

    app.post(
        "/api/auth/register",
        &json!({"name": "Alice", "email": email, "password": "pw123"}),
    )
    .await;

    let (status, response) = app
        .post("/api/auth/login", &json!({"email": email, "password": "pw123"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = response["token"].as_str().unwrap().to_string();

    let (status, profile) = app.get_auth("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], email.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password_and_unknown_user_match() {
    let app = common::TestApp::new().await;
    let email = common::unique_email("wrong_pass");

    app.post(
        "/api/auth/register",
        &json!({"name": "Alice", "email": email, "password": "pw123"}),
    )
    .await;

    let wrong = app
        .post("/api/auth/login", &json!({"email": email, "password": "nope"}))
        .await;
    let unknown = app
        .post(
            "/api/auth/login",
            &json!({"email": common::unique_email("ghost"), "password": "pw123"}),
        )
        .await;

    assert_eq!(wrong.0, StatusCode::BAD_REQUEST);
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn test_full_flow_in_memory() {
    let app = common::TestApp::in_memory();

    let (status, _) = app
        .post(
            "/api/auth/register",
            &json!({"name": "Alice", "email": "a@x.com", "password": "pw123"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app
        .post("/api/auth/login", &json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let token = response["token"].as_str().unwrap();
    let (status, profile) = app.get_auth("/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Alice");

    let (status, response) = app.post("/api/auth/logout", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Logout successful");
}
