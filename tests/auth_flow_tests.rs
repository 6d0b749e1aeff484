//! End-to-end tests for registration, login and session handling.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use test_utils::{register_merchant, send_request, test_app};

#[tokio::test]
async fn register_creates_user_and_merchant_profile() {
    let app = test_app().await.unwrap();

    let (_, body) = register_merchant(&app, "alice").await;

    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "merchant");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let merchant = &body["merchant"];
    assert_eq!(merchant["businessName"], "alice's Business");
    assert_eq!(merchant["businessType"], "Other");
    assert_eq!(merchant["kycStatus"], "pending");
}

#[tokio::test]
async fn register_admin_has_no_merchant_profile() {
    let app = test_app().await.unwrap();

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "root-admin",
            "email": "root@example.com",
            "password": "correct-horse-battery",
            "role": "admin",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body.get("merchant").is_none());
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = test_app().await.unwrap();
    register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "correct-horse-battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app().await.unwrap();
    register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "correct-horse-battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn register_rejects_short_fields_with_details() {
    let app = test_app().await.unwrap();

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "ab",
            "email": "not-an-email",
            "password": "short",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["username"].is_string());
    assert!(body["details"]["email"].is_string());
    assert!(body["details"]["password"].is_string());
}

#[tokio::test]
async fn login_issues_working_session() {
    let app = test_app().await.unwrap();
    register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, me) = send_request(&app, "GET", "/api/users/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app().await.unwrap();
    register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong-password-guess" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_unknown_user_matches_wrong_password_answer() {
    let app = test_app().await.unwrap();

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "ghost", "password": "whatever-goes-here" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn protected_route_requires_token() {
    let app = test_app().await.unwrap();

    let (status, body) = send_request(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send_request(&app, "GET", "/api/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn root_returns_service_info() {
    let app = test_app().await.unwrap();
    let (status, body) = send_request(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "merchant-gateway");
}
