//! # Merchant Repository
//!
//! Repository for Merchant entities: profile creation alongside user
//! registration, admin-side profile updates, and the KYC status machine.

use crate::error::{RepositoryError, is_unique_violation};
use crate::models::merchant::{
    ActiveModel as MerchantActiveModel, Column, Entity as Merchant, KycStatus,
    Model as MerchantModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Request data for creating a merchant profile
#[derive(Debug, Clone)]
pub struct CreateMerchantRequest {
    /// Owning user id; one profile per user
    pub user_id: Uuid,
    /// Registered business name
    pub business_name: String,
    /// Business category
    pub business_type: Option<String>,
    /// Public website
    pub website_url: Option<String>,
}

/// Fields an admin may change on a merchant profile
#[derive(Debug, Clone, Default)]
pub struct UpdateMerchantRequest {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub website_url: Option<String>,
}

/// Repository for Merchant database operations
pub struct MerchantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MerchantRepository<'a, C> {
    /// Create a new MerchantRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a merchant profile. New profiles start in pending KYC.
    pub async fn create_merchant(
        &self,
        request: CreateMerchantRequest,
    ) -> Result<MerchantModel, RepositoryError> {
        let merchant = MerchantActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(request.user_id),
            business_name: Set(request.business_name),
            business_type: Set(request.business_type),
            website_url: Set(request.website_url),
            kyc_status: Set(KycStatus::Pending),
            kyc_data: Set(None),
            created_at: Set(Utc::now().into()),
        };

        merchant.insert(self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                RepositoryError::Conflict("merchant profile")
            } else {
                RepositoryError::Database(err)
            }
        })
    }

    /// Get a merchant by ID
    pub async fn get_merchant_by_id(
        &self,
        merchant_id: Uuid,
    ) -> Result<Option<MerchantModel>, RepositoryError> {
        let merchant = Merchant::find_by_id(merchant_id).one(self.db).await?;
        Ok(merchant)
    }

    /// Get the merchant profile owned by a user
    pub async fn get_merchant_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MerchantModel>, RepositoryError> {
        let merchant = Merchant::find()
            .filter(Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(merchant)
    }

    /// List all merchants
    pub async fn list_merchants(&self) -> Result<Vec<MerchantModel>, RepositoryError> {
        let merchants = Merchant::find().all(self.db).await?;
        Ok(merchants)
    }

    /// Update profile fields on a merchant (admin operation)
    pub async fn update_merchant(
        &self,
        merchant_id: Uuid,
        request: UpdateMerchantRequest,
    ) -> Result<MerchantModel, RepositoryError> {
        // An empty change set would render an invalid UPDATE statement
        if request.business_name.is_none()
            && request.business_type.is_none()
            && request.website_url.is_none()
        {
            return self.require_merchant(merchant_id).await;
        }

        let update = MerchantActiveModel {
            business_name: request.business_name.map_or(NotSet, Set),
            business_type: request.business_type.map_or(NotSet, |v| Set(Some(v))),
            website_url: request.website_url.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        let result = Merchant::update_many()
            .set(update)
            .filter(Column::Id.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("merchant"));
        }

        self.require_merchant(merchant_id).await
    }

    /// Record a KYC submission for the merchant.
    ///
    /// Any current status moves to pending; resubmitting after an approval or
    /// rejection reopens the review with the new documents.
    pub async fn submit_kyc(
        &self,
        merchant_id: Uuid,
        kyc_data: Value,
    ) -> Result<MerchantModel, RepositoryError> {
        let update = MerchantActiveModel {
            kyc_status: Set(KycStatus::Pending),
            kyc_data: Set(Some(kyc_data)),
            ..Default::default()
        };

        let result = Merchant::update_many()
            .set(update)
            .filter(Column::Id.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("merchant"));
        }

        self.require_merchant(merchant_id).await
    }

    /// Apply a KYC review decision (admin operation).
    ///
    /// Callers validate the decision itself; only approved and rejected are
    /// reachable through this path.
    pub async fn review_kyc(
        &self,
        merchant_id: Uuid,
        decision: KycStatus,
        kyc_data: Option<Value>,
    ) -> Result<MerchantModel, RepositoryError> {
        debug_assert!(matches!(decision, KycStatus::Approved | KycStatus::Rejected));

        let update = MerchantActiveModel {
            kyc_status: Set(decision),
            kyc_data: kyc_data.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        let result = Merchant::update_many()
            .set(update)
            .filter(Column::Id.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("merchant"));
        }

        self.require_merchant(merchant_id).await
    }

    async fn require_merchant(&self, merchant_id: Uuid) -> Result<MerchantModel, RepositoryError> {
        self.get_merchant_by_id(merchant_id)
            .await?
            .ok_or(RepositoryError::NotFound("merchant"))
    }
}
