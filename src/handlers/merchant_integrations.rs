//! # Merchant Integration Handlers
//!
//! A merchant's activations of catalog integrations.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::MerchantContext;
use crate::error::{ApiError, not_found};
use crate::handlers::Json;
use crate::models::merchant_integration::Model as MerchantIntegrationModel;
use crate::repositories::{IntegrationRepository, MerchantIntegrationRepository};
use crate::server::AppState;

/// Request payload for activating an integration
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMerchantIntegrationDto {
    /// Catalog integration to activate
    pub integration_id: Uuid,
    /// Per-merchant configuration
    pub config: Option<serde_json::Value>,
}

/// List the caller's integration activations
#[utoipa::path(
    get,
    path = "/api/merchant-integrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant's activations, newest first", body = [MerchantIntegrationModel]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "merchant-integrations"
)]
pub async fn list_merchant_integrations(
    State(state): State<AppState>,
    ctx: MerchantContext,
) -> Result<Json<Vec<MerchantIntegrationModel>>, ApiError> {
    let activations = MerchantIntegrationRepository::new(&state.db)
        .list_for_merchant(ctx.merchant.id)
        .await?;
    Ok(Json(activations))
}

/// Activate a catalog integration for the caller's merchant
#[utoipa::path(
    post,
    path = "/api/merchant-integrations",
    security(("bearer_auth" = [])),
    request_body = CreateMerchantIntegrationDto,
    responses(
        (status = 201, description = "Created activation", body = MerchantIntegrationModel),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "Integration not found", body = ApiError),
        (status = 409, description = "Integration already activated", body = ApiError)
    ),
    tag = "merchant-integrations"
)]
pub async fn create_merchant_integration(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<CreateMerchantIntegrationDto>,
) -> Result<(StatusCode, Json<MerchantIntegrationModel>), ApiError> {
    let integration = IntegrationRepository::new(&state.db)
        .get_integration_by_id(request.integration_id)
        .await?;
    if integration.is_none_or(|integration| !integration.is_active) {
        return Err(not_found("Integration"));
    }

    let activation = MerchantIntegrationRepository::new(&state.db)
        .create_activation(ctx.merchant.id, request.integration_id, request.config)
        .await?;

    Ok((StatusCode::CREATED, Json(activation)))
}
