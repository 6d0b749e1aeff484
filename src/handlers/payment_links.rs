//! # Payment Link API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::MerchantContext;
use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::handlers::transactions::validate_currency;
use crate::models::payment_link::Model as PaymentLinkModel;
use crate::repositories::PaymentLinkRepository;
use crate::repositories::payment_link::{CreatePaymentLinkRequest, UpdatePaymentLinkRequest};
use crate::server::AppState;

/// Request payload for creating a payment link
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLinkDto {
    /// Title, at least 3 characters
    #[schema(example = "Sticker pack")]
    pub title: String,
    pub description: Option<String>,
    /// Fixed amount in minor units, at least 1; omit for customer-chosen
    pub amount: Option<i64>,
    /// Three-letter uppercase currency code; defaults to USD
    pub currency: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub metadata: Option<serde_json::Value>,
}

/// Request payload for updating a payment link
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentLinkDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
    pub expires_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub metadata: Option<serde_json::Value>,
}

fn validate_link_fields(
    title: Option<&str>,
    amount: Option<i64>,
    currency: Option<&str>,
) -> Result<(), ApiError> {
    let mut field_errors = serde_json::Map::new();
    if let Some(title) = title {
        if title.trim().len() < 3 {
            field_errors.insert("title".to_string(), "Must be at least 3 characters".into());
        }
    }
    if let Some(amount) = amount {
        if amount < 1 {
            field_errors.insert("amount".to_string(), "Must be at least 1".into());
        }
    }
    if let Some(currency) = currency {
        if !validate_currency(currency) {
            field_errors.insert(
                "currency".to_string(),
                "Must be a three-letter uppercase code".into(),
            );
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(
            "Payment link payload invalid",
            serde_json::Value::Object(field_errors),
        ))
    }
}

/// List the caller's payment links
#[utoipa::path(
    get,
    path = "/api/payment-links",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant's payment links, newest first", body = [PaymentLinkModel]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "payment-links"
)]
pub async fn list_payment_links(
    State(state): State<AppState>,
    ctx: MerchantContext,
) -> Result<Json<Vec<PaymentLinkModel>>, ApiError> {
    let links = PaymentLinkRepository::new(&state.db)
        .list_for_merchant(ctx.merchant.id)
        .await?;
    Ok(Json(links))
}

/// Create a payment link for the caller's merchant
#[utoipa::path(
    post,
    path = "/api/payment-links",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentLinkDto,
    responses(
        (status = 201, description = "Created payment link", body = PaymentLinkModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "payment-links"
)]
pub async fn create_payment_link(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<CreatePaymentLinkDto>,
) -> Result<(StatusCode, Json<PaymentLinkModel>), ApiError> {
    let currency = request.currency.unwrap_or_else(|| "USD".to_string());
    validate_link_fields(Some(&request.title), request.amount, Some(&currency))?;

    let link = PaymentLinkRepository::new(&state.db)
        .create_link(
            ctx.merchant.id,
            CreatePaymentLinkRequest {
                title: request.title.trim().to_string(),
                description: request.description,
                amount: request.amount,
                currency,
                expires_at: request.expires_at,
                metadata: request.metadata,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Update one of the caller's payment links
#[utoipa::path(
    put,
    path = "/api/payment-links/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Payment link id")),
    request_body = UpdatePaymentLinkDto,
    responses(
        (status = 200, description = "Updated payment link", body = PaymentLinkModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "payment-links"
)]
pub async fn update_payment_link(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(link_id): Path<Uuid>,
    Json(request): Json<UpdatePaymentLinkDto>,
) -> Result<Json<PaymentLinkModel>, ApiError> {
    validate_link_fields(
        request.title.as_deref(),
        request.amount,
        request.currency.as_deref(),
    )?;

    let link = PaymentLinkRepository::new(&state.db)
        .update_link(
            ctx.merchant.id,
            link_id,
            UpdatePaymentLinkRequest {
                title: request.title,
                description: request.description,
                amount: request.amount,
                currency: request.currency,
                is_active: request.is_active,
                expires_at: request.expires_at,
                metadata: request.metadata,
            },
        )
        .await?;
    Ok(Json(link))
}

/// Delete one of the caller's payment links
#[utoipa::path(
    delete,
    path = "/api/payment-links/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Payment link id")),
    responses(
        (status = 204, description = "Payment link deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "payment-links"
)]
pub async fn delete_payment_link(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(link_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PaymentLinkRepository::new(&state.db)
        .delete_link(ctx.merchant.id, link_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
