//! # Payment Intent Handlers

use axum::extract::State;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::handlers::transactions::validate_currency;
use crate::payments::PaymentIntent;
use crate::server::AppState;

/// Request payload for creating a payment intent
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentDto {
    /// Amount in minor currency units, at least 1
    #[schema(example = 2500)]
    pub amount: i64,
    /// Three-letter uppercase currency code; defaults to USD
    #[schema(example = "USD")]
    pub currency: Option<String>,
}

/// Create a payment intent at the external provider
#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 200, description = "Created intent", body = PaymentIntent),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 502, description = "Payment provider unavailable", body = ApiError)
    ),
    tag = "payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentIntentDto>,
) -> Result<Json<PaymentIntent>, ApiError> {
    let currency = request.currency.unwrap_or_else(|| "USD".to_string());

    let mut field_errors = serde_json::Map::new();
    if request.amount < 1 {
        field_errors.insert("amount".to_string(), "Must be at least 1".into());
    }
    if !validate_currency(&currency) {
        field_errors.insert(
            "currency".to_string(),
            "Must be a three-letter uppercase code".into(),
        );
    }
    if !field_errors.is_empty() {
        return Err(validation_error(
            "Payment intent payload invalid",
            serde_json::Value::Object(field_errors),
        ));
    }

    let intent = state
        .payments
        .create_payment_intent(request.amount, &currency)
        .await?;

    Ok(Json(intent))
}
