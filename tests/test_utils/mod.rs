//! Test utilities for API testing.
//!
//! Builds the full application router over an in-memory SQLite database with
//! all migrations applied, plus helpers for driving requests and sessions.

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gateway::config::AppConfig;
use gateway::migration::{Migrator, MigratorTrait};
use gateway::payments::HttpPaymentProvider;
use gateway::server::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the application with a payment provider pointed at `provider_base`.
///
/// Tests that never touch the payment route can pass an unroutable address.
pub async fn test_app_with_provider(provider_base: &str) -> Result<Router> {
    let db = setup_test_db().await?;
    let config = AppConfig {
        session_secret: "integration-test-session-secret".to_string(),
        ..AppConfig::default()
    };
    let payments = Arc::new(HttpPaymentProvider::new(
        provider_base.to_string(),
        Some("sk_test_key".to_string()),
    ));
    let state = AppState {
        config: Arc::new(config),
        db,
        payments,
    };
    Ok(create_app(state))
}

/// Builds the application with a payment provider that is never reachable
pub async fn test_app() -> Result<Router> {
    test_app_with_provider("http://127.0.0.1:1").await
}

/// Sends a JSON request and returns the status plus parsed body
pub async fn send_request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, parsed)
}

/// Registers a merchant account and returns (token, response body)
pub async fn register_merchant(app: &Router, username: &str) -> (String, Value) {
    let (status, body) = send_request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct-horse-battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    let token = body["token"].as_str().expect("token in response").to_string();
    (token, body)
}

/// Registers an admin account and returns its session token
pub async fn register_admin(app: &Router, username: &str) -> String {
    let (status, body) = send_request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct-horse-battery",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["token"].as_str().expect("token in response").to_string()
}
