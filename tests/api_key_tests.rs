//! API key lifecycle tests: server-side generation, listing and deletion.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use test_utils::{register_merchant, send_request, test_app};

#[tokio::test]
async fn created_keys_are_server_generated() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let (status, key) = send_request(
        &app,
        "POST",
        "/api/api-keys",
        Some(&alice),
        Some(json!({ "name": "Storefront checkout" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let value = key["key"].as_str().unwrap();
    assert!(value.starts_with("pk_"));
    assert_eq!(value.len(), 35);
    assert_eq!(key["name"], "Storefront checkout");
    assert_eq!(key["isActive"], true);
}

#[tokio::test]
async fn client_supplied_key_value_is_ignored() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    // "key" is not part of the request contract; the value still comes from the server
    let (status, key) = send_request(
        &app,
        "POST",
        "/api/api-keys",
        Some(&alice),
        Some(json!({ "name": "Sneaky", "key": "pk_attacker_chosen_value_000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(key["key"], "pk_attacker_chosen_value_000000000");
}

#[tokio::test]
async fn successive_keys_are_unique() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let mut seen = std::collections::HashSet::new();
    for i in 0..5 {
        let (_, key) = send_request(
            &app,
            "POST",
            "/api/api-keys",
            Some(&alice),
            Some(json!({ "name": format!("key-{}", i) })),
        )
        .await;
        assert!(seen.insert(key["key"].as_str().unwrap().to_string()));
    }

    let (_, list) = send_request(&app, "GET", "/api/api-keys", Some(&alice), None).await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn listing_never_returns_the_full_secret() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let (_, created) = send_request(
        &app,
        "POST",
        "/api/api-keys",
        Some(&alice),
        Some(json!({ "name": "Storefront checkout" })),
    )
    .await;
    let secret = created["key"].as_str().unwrap().to_string();

    let (status, list) = send_request(&app, "GET", "/api/api-keys", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let entry = &list.as_array().unwrap()[0];
    assert!(entry.get("key").is_none());

    let preview = entry["keyPreview"].as_str().unwrap();
    assert_ne!(preview, secret);
    assert_eq!(preview, format!("pk_...{}", &secret[secret.len() - 4..]));
    assert_eq!(entry["name"], "Storefront checkout");
}

#[tokio::test]
async fn key_deletion_is_merchant_scoped() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;
    let (bob, _) = register_merchant(&app, "bob").await;

    let (_, key) = send_request(
        &app,
        "POST",
        "/api/api-keys",
        Some(&alice),
        Some(json!({ "name": "Storefront checkout" })),
    )
    .await;
    let uri = format!("/api/api-keys/{}", key["id"].as_str().unwrap());

    let (status, _) = send_request(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_request(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_request(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn key_name_is_validated() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/api-keys",
        Some(&alice),
        Some(json!({ "name": "ab" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
