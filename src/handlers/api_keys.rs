//! # API Key Handlers
//!
//! Key values are generated server-side; the request payload carries only a
//! display name.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::MerchantContext;
use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::models::api_key::Model as ApiKeyModel;
use crate::repositories::ApiKeyRepository;
use crate::server::AppState;

/// Request payload for creating an API key
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyDto {
    /// Display name, at least 3 characters
    #[schema(example = "Storefront checkout")]
    pub name: String,
}

/// API key as shown everywhere except the create response.
///
/// The key value is a display-once secret; listings carry only a masked
/// preview of it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeySummaryDto {
    pub id: Uuid,
    pub name: String,
    /// Masked form of the key value, e.g. `pk_...8wEp`
    #[schema(example = "pk_...8wEp")]
    pub key_preview: String,
    pub is_active: bool,
    #[schema(value_type = String, example = "2025-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = Option<String>, example = "2025-01-01T12:00:00Z")]
    pub last_used: Option<DateTimeWithTimeZone>,
}

impl From<ApiKeyModel> for ApiKeySummaryDto {
    fn from(key: ApiKeyModel) -> Self {
        Self {
            id: key.id,
            name: key.name,
            key_preview: mask_key(&key.key),
            is_active: key.is_active,
            created_at: key.created_at,
            last_used: key.last_used,
        }
    }
}

fn mask_key(key: &str) -> String {
    // Key values are ASCII (prefix plus alphanumeric tail)
    let tail = &key[key.len().saturating_sub(4)..];
    format!("pk_...{}", tail)
}

/// List the caller's API keys
#[utoipa::path(
    get,
    path = "/api/api-keys",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant's API keys, newest first, with masked key values", body = [ApiKeySummaryDto]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "api-keys"
)]
pub async fn list_api_keys(
    State(state): State<AppState>,
    ctx: MerchantContext,
) -> Result<Json<Vec<ApiKeySummaryDto>>, ApiError> {
    let keys = ApiKeyRepository::new(&state.db)
        .list_for_merchant(ctx.merchant.id)
        .await?;
    Ok(Json(keys.into_iter().map(ApiKeySummaryDto::from).collect()))
}

/// Create an API key with a server-generated value
#[utoipa::path(
    post,
    path = "/api/api-keys",
    security(("bearer_auth" = [])),
    request_body = CreateApiKeyDto,
    responses(
        (status = 201, description = "Created key, including its value", body = ApiKeyModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "api-keys"
)]
pub async fn create_api_key(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<CreateApiKeyDto>,
) -> Result<(StatusCode, Json<ApiKeyModel>), ApiError> {
    if request.name.trim().len() < 3 {
        return Err(validation_error(
            "API key payload invalid",
            serde_json::json!({ "name": "Must be at least 3 characters" }),
        ));
    }

    let key = ApiKeyRepository::new(&state.db)
        .create_key(ctx.merchant.id, request.name.trim().to_string())
        .await?;

    tracing::info!(merchant_id = %ctx.merchant.id, key_id = %key.id, "API key created");
    Ok((StatusCode::CREATED, Json(key)))
}

/// Delete one of the caller's API keys
#[utoipa::path(
    delete,
    path = "/api/api-keys/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "API key id")),
    responses(
        (status = 204, description = "Key deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Not found for this merchant", body = ApiError)
    ),
    tag = "api-keys"
)]
pub async fn delete_api_key(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Path(key_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ApiKeyRepository::new(&state.db)
        .delete_key(ctx.merchant.id, key_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_only_the_tail() {
        let masked = mask_key("pk_SUF9aXxcrhRTwabzY7DoBuYwYy8IwEpf");
        assert_eq!(masked, "pk_...wEpf");
    }
}
