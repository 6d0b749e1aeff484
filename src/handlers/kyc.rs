//! # KYC API Handlers
//!
//! Merchant-side submission endpoint of the KYC status machine. Review
//! decisions live on the admin merchant update endpoint.

use axum::extract::State;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::MerchantContext;
use crate::error::{ApiError, validation_error};
use crate::handlers::Json;
use crate::models::merchant::Model as MerchantModel;
use crate::repositories::MerchantRepository;
use crate::server::AppState;

/// Request payload for a KYC submission
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycDto {
    /// Submitted verification documents and details, stored as-is
    pub kyc_data: serde_json::Value,
}

/// Submit KYC details for review.
///
/// Always allowed for the owning merchant; any current status moves back to
/// pending so a fresh submission reopens review.
#[utoipa::path(
    post,
    path = "/api/kyc",
    security(("bearer_auth" = [])),
    request_body = SubmitKycDto,
    responses(
        (status = 200, description = "Merchant with pending KYC", body = MerchantModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError)
    ),
    tag = "kyc"
)]
pub async fn submit(
    State(state): State<AppState>,
    ctx: MerchantContext,
    Json(request): Json<SubmitKycDto>,
) -> Result<Json<MerchantModel>, ApiError> {
    if !request.kyc_data.is_object() {
        return Err(validation_error(
            "KYC payload invalid",
            serde_json::json!({ "kycData": "Must be a JSON object" }),
        ));
    }

    let merchant = MerchantRepository::new(&state.db)
        .submit_kyc(ctx.merchant.id, request.kyc_data)
        .await?;

    tracing::info!(merchant_id = %merchant.id, "KYC submission recorded");
    Ok(Json(merchant))
}
