//! Cross-merchant isolation tests: one merchant can never read or mutate
//! another merchant's resources, and mismatches answer 404.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use test_utils::{register_merchant, send_request, test_app};

#[tokio::test]
async fn payment_links_are_invisible_across_merchants() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;
    let (bob, _) = register_merchant(&app, "bob").await;

    let (status, link) = send_request(
        &app,
        "POST",
        "/api/payment-links",
        Some(&alice),
        Some(json!({ "title": "Sticker pack", "amount": 500, "currency": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, alice_links) = send_request(&app, "GET", "/api/payment-links", Some(&alice), None).await;
    assert_eq!(alice_links.as_array().unwrap().len(), 1);

    let (_, bob_links) = send_request(&app, "GET", "/api/payment-links", Some(&bob), None).await;
    assert_eq!(bob_links.as_array().unwrap().len(), 0);

    // Bob cannot delete Alice's link, and learns nothing beyond 404
    let uri = format!("/api/payment-links/{}", link["id"].as_str().unwrap());
    let (status, body) = send_request(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // Alice's link survives
    let (_, alice_links) = send_request(&app, "GET", "/api/payment-links", Some(&alice), None).await;
    assert_eq!(alice_links.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn transaction_status_patch_is_merchant_scoped() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;
    let (bob, _) = register_merchant(&app, "bob").await;

    let (status, txn) = send_request(
        &app,
        "POST",
        "/api/transactions",
        Some(&alice),
        Some(json!({ "amount": 2500, "currency": "USD", "customerEmail": "c@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(txn["status"], "pending");

    let uri = format!("/api/transactions/{}", txn["id"].as_str().unwrap());

    let (status, _) = send_request(
        &app,
        "PATCH",
        &uri,
        Some(&bob),
        Some(json!({ "status": "succeeded" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = send_request(
        &app,
        "PATCH",
        &uri,
        Some(&alice),
        Some(json!({ "status": "succeeded" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "succeeded");
}

#[tokio::test]
async fn subscription_update_across_merchants_answers_404() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;
    let (bob, _) = register_merchant(&app, "bob").await;

    let (status, plan) = send_request(
        &app,
        "POST",
        "/api/subscriptions",
        Some(&alice),
        Some(json!({ "name": "Pro monthly", "amount": 999, "interval": "month" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/subscriptions/{}", plan["id"].as_str().unwrap());
    let (status, _) = send_request(
        &app,
        "PUT",
        &uri,
        Some(&bob),
        Some(json!({ "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_delete_of_same_id_is_404() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let (_, link) = send_request(
        &app,
        "POST",
        "/api/payment-links",
        Some(&alice),
        Some(json!({ "title": "One-off", "amount": 100, "currency": "EUR" })),
    )
    .await;
    let uri = format!("/api/payment-links/{}", link["id"].as_str().unwrap());

    let (status, _) = send_request(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_request(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transactions_list_only_shows_own_rows() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;
    let (bob, _) = register_merchant(&app, "bob").await;

    for amount in [100, 200, 300] {
        let (status, _) = send_request(
            &app,
            "POST",
            "/api/transactions",
            Some(&alice),
            Some(json!({ "amount": amount, "currency": "USD" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, alice_rows) = send_request(&app, "GET", "/api/transactions", Some(&alice), None).await;
    assert_eq!(alice_rows.as_array().unwrap().len(), 3);

    let (_, bob_rows) = send_request(&app, "GET", "/api/transactions", Some(&bob), None).await;
    assert_eq!(bob_rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_rejects_invalid_amount_and_currency() {
    let app = test_app().await.unwrap();
    let (alice, _) = register_merchant(&app, "alice").await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/transactions",
        Some(&alice),
        Some(json!({ "amount": 0, "currency": "usd" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["amount"].is_string());
    assert!(body["details"]["currency"].is_string());
}
