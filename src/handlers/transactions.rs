//! # Transaction API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::MerchantContext;
use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::models::transaction::{Model as TransactionModel, TransactionStatus};
use crate::repositories::TransactionRepository;
use crate::repositories::transaction::CreateTransactionRequest;
use crate::server::AppState;

pub(crate) fn validate_currency(currency: &str) -> bool {
    currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase())
}

/// Request payload for recording a transaction
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionDto {
    /// Amount in minor currency units, at least 1
    #[schema(example = 2500)]
    pub amount: i64,
    /// Three-letter uppercase currency code
    #[schema(example = "USD")]
    pub currency: String,
    /// Initial status; defaults to pending
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Request payload for updating a transaction's status
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionDto {
    pub status: TransactionStatus,
}

/// List the caller's transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant's transactions, newest first", body = [TransactionModel]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    ctx: MerchantContext,
) -> Result<Json<Vec<TransactionModel>>, ApiError> {
    let transactions = TransactionRepository::new(&state.db)
        .list_for_merchant(ctx.merchant.id)
        .await?;
    Ok(Json(transactions))
}

/// Record a transaction for the caller's merchant
#[utoipa::path(
    post,
    path = "/api/transactions",
    security(("bearer_auth" = [])),
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<CreateTransactionDto>,
) -> Result<(StatusCode, Json<TransactionModel>), ApiError> {
    let mut field_errors = serde_json::Map::new();
    if request.amount < 1 {
        field_errors.insert("amount".to_string(), "Must be at least 1".into());
    }
    if !validate_currency(&request.currency) {
        field_errors.insert(
            "currency".to_string(),
            "Must be a three-letter uppercase code".into(),
        );
    }
    if !field_errors.is_empty() {
        return Err(validation_error(
            "Transaction payload invalid",
            serde_json::Value::Object(field_errors),
        ));
    }

    let transaction = TransactionRepository::new(&state.db)
        .create_transaction(
            ctx.merchant.id,
            CreateTransactionRequest {
                amount: request.amount,
                currency: request.currency,
                status: request.status.unwrap_or(TransactionStatus::Pending),
                payment_method: request.payment_method,
                customer_email: request.customer_email,
                metadata: request.metadata,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Update the status of one of the caller's transactions
#[utoipa::path(
    patch,
    path = "/api/transactions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Transaction id")),
    request_body = UpdateTransactionDto,
    responses(
        (status = 200, description = "Updated transaction", body = TransactionModel),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(transaction_id): Path<Uuid>,
    Json(request): Json<UpdateTransactionDto>,
) -> Result<Json<TransactionModel>, ApiError> {
    let transaction = TransactionRepository::new(&state.db)
        .update_status(ctx.merchant.id, transaction_id, request.status)
        .await?;
    Ok(Json(transaction))
}
