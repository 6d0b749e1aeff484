//! Role gate tests: admin surfaces reject merchants, merchant surfaces reject
//! admins, and unauthenticated calls get 401 before any 403.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use test_utils::{register_admin, register_merchant, send_request, test_app};

#[tokio::test]
async fn admin_routes_reject_merchants() {
    let app = test_app().await.unwrap();
    let (merchant, _) = register_merchant(&app, "alice").await;

    for uri in ["/api/admin/users", "/api/admin/merchants"] {
        let (status, body) = send_request(&app, "GET", uri, Some(&merchant), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "expected 403 for {}", uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn admin_routes_require_authentication_first() {
    let app = test_app().await.unwrap();

    let (status, body) = send_request(&app, "GET", "/api/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn admin_sees_all_accounts() {
    let app = test_app().await.unwrap();
    register_merchant(&app, "alice").await;
    register_merchant(&app, "bob").await;
    let admin = register_admin(&app, "root-admin").await;

    let (status, users) = send_request(&app, "GET", "/api/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 3);
    for user in users.as_array().unwrap() {
        assert!(user.get("passwordHash").is_none());
    }

    let (status, merchants) =
        send_request(&app, "GET", "/api/admin/merchants", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(merchants.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn merchant_routes_reject_admins() {
    let app = test_app().await.unwrap();
    let admin = register_admin(&app, "root-admin").await;

    for uri in ["/api/merchants/me", "/api/transactions", "/api/api-keys"] {
        let (status, body) = send_request(&app, "GET", uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "expected 403 for {}", uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn integration_catalog_is_admin_writable_public_readable() {
    let app = test_app().await.unwrap();
    let (merchant, _) = register_merchant(&app, "alice").await;
    let admin = register_admin(&app, "root-admin").await;

    // Public read works with no session at all
    let (status, list) = send_request(&app, "GET", "/api/integrations", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);

    // Merchants cannot write the catalog
    let (status, _) = send_request(
        &app,
        "POST",
        "/api/integrations",
        Some(&merchant),
        Some(json!({ "name": "Slack" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send_request(
        &app,
        "POST",
        "/api/integrations",
        Some(&admin),
        Some(json!({ "name": "Slack", "category": "messaging" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send_request(&app, "GET", "/api/integrations", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Single-entry fetch is public too
    let uri = format!("/api/integrations/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send_request(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Slack");

    // Deactivating hides the entry from the public list
    let (status, _) = send_request(
        &app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({ "isActive": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send_request(&app, "GET", "/api/integrations", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    // And from the single-entry fetch
    let (status, _) = send_request(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn merchant_integration_activation_flow() {
    let app = test_app().await.unwrap();
    let (merchant, _) = register_merchant(&app, "alice").await;
    let admin = register_admin(&app, "root-admin").await;

    let (_, integration) = send_request(
        &app,
        "POST",
        "/api/integrations",
        Some(&admin),
        Some(json!({ "name": "Slack" })),
    )
    .await;
    let integration_id = integration["id"].as_str().unwrap();

    let (status, _) = send_request(
        &app,
        "POST",
        "/api/merchant-integrations",
        Some(&merchant),
        Some(json!({ "integrationId": integration_id, "config": { "channel": "#sales" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Second activation of the same pair conflicts
    let (status, body) = send_request(
        &app,
        "POST",
        "/api/merchant-integrations",
        Some(&merchant),
        Some(json!({ "integrationId": integration_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // Unknown integration answers 404
    let (status, _) = send_request(
        &app,
        "POST",
        "/api/merchant-integrations",
        Some(&merchant),
        Some(json!({ "integrationId": uuid::Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) =
        send_request(&app, "GET", "/api/merchant-integrations", Some(&merchant), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
