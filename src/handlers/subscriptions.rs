//! # Subscription Plan API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::MerchantContext;
use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::handlers::transactions::validate_currency;
use crate::models::subscription::{Model as SubscriptionModel, PlanInterval};
use crate::repositories::SubscriptionRepository;
use crate::repositories::subscription::{CreateSubscriptionRequest, UpdateSubscriptionRequest};
use crate::server::AppState;

/// Request payload for creating a subscription plan
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionDto {
    /// Plan name, at least 3 characters
    #[schema(example = "Pro monthly")]
    pub name: String,
    /// Recurring amount in minor units, at least 1
    pub amount: i64,
    /// Three-letter uppercase currency code; defaults to USD
    pub currency: Option<String>,
    pub interval: PlanInterval,
    pub metadata: Option<serde_json::Value>,
}

/// Request payload for updating a subscription plan
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionDto {
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<PlanInterval>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

fn validate_plan_fields(
    name: Option<&str>,
    amount: Option<i64>,
    currency: Option<&str>,
) -> Result<(), ApiError> {
    let mut field_errors = serde_json::Map::new();
    if let Some(name) = name {
        if name.trim().len() < 3 {
            field_errors.insert("name".to_string(), "Must be at least 3 characters".into());
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
            "Subscription payload invalid",
            serde_json::Value::Object(field_errors),
        ))
    }
}

/// List the caller's subscription plans
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant's plans, newest first", body = [SubscriptionModel]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "subscriptions"
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    ctx: MerchantContext,
) -> Result<Json<Vec<SubscriptionModel>>, ApiError> {
    let plans = SubscriptionRepository::new(&state.db)
        .list_for_merchant(ctx.merchant.id)
        .await?;
    Ok(Json(plans))
}

/// Create a subscription plan for the caller's merchant
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscriptionDto,
    responses(
        (status = 201, description = "Created plan", body = SubscriptionModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "subscriptions"
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<CreateSubscriptionDto>,
) -> Result<(StatusCode, Json<SubscriptionModel>), ApiError> {
    let currency = request.currency.unwrap_or_else(|| "USD".to_string());
    validate_plan_fields(Some(&request.name), Some(request.amount), Some(&currency))?;

    let plan = SubscriptionRepository::new(&state.db)
        .create_subscription(
            ctx.merchant.id,
            CreateSubscriptionRequest {
                name: request.name.trim().to_string(),
                amount: request.amount,
                currency,
                interval: request.interval,
                metadata: request.metadata,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Update one of the caller's subscription plans
#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Subscription plan id")),
    request_body = UpdateSubscriptionDto,
    responses(
        (status = 200, description = "Updated plan", body = SubscriptionModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "subscriptions"
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(subscription_id): Path<Uuid>,
    Json(request): Json<UpdateSubscriptionDto>,
) -> Result<Json<SubscriptionModel>, ApiError> {
    validate_plan_fields(
        request.name.as_deref(),
        request.amount,
        request.currency.as_deref(),
    )?;

    let plan = SubscriptionRepository::new(&state.db)
        .update_subscription(
            ctx.merchant.id,
            subscription_id,
            UpdateSubscriptionRequest {
                name: request.name,
                amount: request.amount,
                currency: request.currency,
                interval: request.interval,
                is_active: request.is_active,
                metadata: request.metadata,
            },
        )
        .await?;
    Ok(Json(plan))
}

/// Delete one of the caller's subscription plans
#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Subscription plan id")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "subscriptions"
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(subscription_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    SubscriptionRepository::new(&state.db)
        .delete_subscription(ctx.merchant.id, subscription_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
