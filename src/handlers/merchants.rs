//! # Merchant API Handlers
//!
//! Merchant self-service profile read plus the admin surface: listing all
//! merchants and applying profile updates and KYC review decisions.

use axum::extract::{Path, State};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{AdminUser, MerchantContext};
use crate::error::{ApiError, invalid_transition, validation_error};
use crate::handlers::Json;
use crate::models::merchant::{KycStatus, Model as MerchantModel};
use crate::repositories::MerchantRepository;
use crate::repositories::merchant::UpdateMerchantRequest;
use crate::server::AppState;

/// Return the caller's merchant profile
#[utoipa::path(
    get,
    path = "/api/merchants/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merchant profile", body = MerchantModel),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Merchant role required", body = ApiError),
        (status = 404, description = "No merchant profile", body = ApiError)
    ),
    tag = "merchants"
)]
pub async fn me(ctx: MerchantContext) -> Json<MerchantModel> {
    Json(ctx.merchant)
}

/// List every merchant profile (admin)
#[utoipa::path(
    get,
    path = "/api/admin/merchants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All merchants", body = [MerchantModel]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "admin"
)]
pub async fn list_merchants(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<MerchantModel>>, ApiError> {
    let merchants = MerchantRepository::new(&state.db).list_merchants().await?;
    Ok(Json(merchants))
}

/// Request payload for the admin merchant update, including KYC review
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateMerchantDto {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub website_url: Option<String>,
    /// Review decision; only approved and rejected are accepted
    pub kyc_status: Option<KycStatus>,
    /// Review fields merged into the stored kyc_data, e.g. a rejectionReason
    pub kyc_data: Option<serde_json::Value>,
    /// Reason recorded into kyc_data on rejection
    pub rejection_reason: Option<String>,
}

/// Update a merchant profile and/or apply a KYC review decision (admin)
#[utoipa::path(
    put,
    path = "/api/admin/merchants/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Merchant id")),
    request_body = AdminUpdateMerchantDto,
    responses(
        (status = 200, description = "Updated merchant", body = MerchantModel),
        (status = 400, description = "Validation failed or invalid KYC transition", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Merchant not found", body = ApiError)
    ),
    tag = "admin"
)]
pub async fn update_merchant(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(merchant_id): Path<Uuid>,
    Json(request): Json<AdminUpdateMerchantDto>,
) -> Result<Json<MerchantModel>, ApiError> {
    if let Some(name) = &request.business_name {
        if name.trim().len() < 3 {
            return Err(validation_error(
                "Merchant payload invalid",
                serde_json::json!({ "businessName": "Must be at least 3 characters" }),
            ));
        }
    }
    if let Some(website_url) = request.website_url.as_deref().filter(|u| !u.is_empty()) {
        if url::Url::parse(website_url).is_err() {
            return Err(validation_error(
                "Merchant payload invalid",
                serde_json::json!({ "websiteUrl": "Must be a valid URL" }),
            ));
        }
    }

    if let Some(decision) = request.kyc_status {
        if !matches!(decision, KycStatus::Approved | KycStatus::Rejected) {
            return Err(invalid_transition(
                "KYC review may only set approved or rejected",
            ));
        }
    }
    if let Some(kyc_data) = &request.kyc_data {
        if !kyc_data.is_object() {
            return Err(validation_error(
                "Merchant payload invalid",
                serde_json::json!({ "kycData": "Must be a JSON object" }),
            ));
        }
    }

    let repo = MerchantRepository::new(&state.db);

    let mut merchant = repo
        .update_merchant(
            merchant_id,
            UpdateMerchantRequest {
                business_name: request.business_name,
                business_type: request.business_type,
                website_url: request.website_url,
            },
        )
        .await?;

    if let Some(decision) = request.kyc_status {
        // Merge the review record into whatever the merchant submitted
        let mut kyc_data = merchant
            .kyc_data
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        if let Some(object) = kyc_data.as_object_mut() {
            // Reviewer-supplied fields (e.g. a rejectionReason sent as
            // kycData) land alongside the merchant's submission
            if let Some(extra) = request.kyc_data.as_ref().and_then(|v| v.as_object()) {
                for (k, v) in extra {
                    object.insert(k.clone(), v.clone());
                }
            }
            object.insert("reviewedAt".to_string(), Utc::now().to_rfc3339().into());
            object.insert("reviewedBy".to_string(), admin.id.to_string().into());
            if decision == KycStatus::Rejected {
                if let Some(reason) = &request.rejection_reason {
                    object.insert("rejectionReason".to_string(), reason.clone().into());
                }
            }
        }

        merchant = repo.review_kyc(merchant_id, decision, Some(kyc_data)).await?;
        tracing::info!(
            merchant_id = %merchant_id,
            decision = ?decision,
            reviewed_by = %admin.id,
            "KYC review recorded"
        );
    }

    Ok(Json(merchant))
}
