//! Registration, login, and token handling over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

fn registration(email: &str, password: &str, role: &str) -> serde_json::Value {
    json!({
        "name": "Nora",
        "email": email,
        "password": password,
        "role": role,
    })
}

#[tokio::test]
async fn test_register_then_login_and_fetch_profile() {
    let app = TestApp::new();

    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration("nora@example.com", "hunter22", "innovator")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["user"]["role"], "innovator");
    assert!(json["data"]["user"].get("passwordHash").is_none());

    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "nora@example.com", "password": "hunter22" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let (status, json) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "nora@example.com");
    assert_eq!(json["data"]["name"], "Nora");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_share_a_401() {
    let app = TestApp::new();
    app.send(
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("nora@example.com", "hunter22", "reviewer")),
    )
    .await;

    let (status, wrong) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "nora@example.com", "password": "nope-nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "hunter22" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["error"], unknown["error"]);
}

#[tokio::test]
async fn test_duplicate_email_is_409() {
    let app = TestApp::new();
    let body = registration("dup@example.com", "hunter22", "admin");

    let (status, _) = app
        .send(Method::POST, "/api/v1/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = app
        .send(Method::POST, "/api/v1/auth/register", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "User with this email already exists");
}

#[tokio::test]
async fn test_registration_input_is_validated() {
    let app = TestApp::new();

    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration("nora@example.com", "short", "innovator")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration("not-an-email", "hunter22", "innovator")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration("nora@example.com", "hunter22", "superuser")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_body_fields_are_bad_requests() {
    let app = TestApp::new();
    let (status, json) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "nora@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let app = TestApp::new();

    let (status, json) = app.send(Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send(Method::GET, "/api/v1/auth/me", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public_and_outside_api_prefix() {
    let app = TestApp::new();
    let (status, json) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}
