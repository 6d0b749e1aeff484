//! # Merchant Integration Repository
//!
//! Activations linking a merchant to a catalog integration. The composite
//! unique index keeps each pair to a single activation.

use crate::error::{RepositoryError, is_unique_violation};
use crate::models::merchant_integration::{
    ActiveModel as MerchantIntegrationActiveModel, Column, Entity as MerchantIntegration,
    Model as MerchantIntegrationModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Repository for MerchantIntegration database operations
pub struct MerchantIntegrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MerchantIntegrationRepository<'a, C> {
    /// Create a new MerchantIntegrationRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List a merchant's activations, newest first
    pub async fn list_for_merchant(
        &self,
        merchant_id: Uuid,
    ) -> Result<Vec<MerchantIntegrationModel>, RepositoryError> {
        let activations = MerchantIntegration::find()
            .filter(Column::MerchantId.eq(merchant_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(activations)
    }

    /// Activate a catalog integration for the merchant.
    ///
    /// Callers verify the integration exists first; a duplicate activation
    /// surfaces as a conflict from the composite unique index.
    pub async fn create_activation(
        &self,
        merchant_id: Uuid,
        integration_id: Uuid,
        config: Option<Value>,
    ) -> Result<MerchantIntegrationModel, RepositoryError> {
        let activation = MerchantIntegrationActiveModel {
            id: Set(Uuid::new_v4()),
            merchant_id: Set(merchant_id),
            integration_id: Set(integration_id),
            is_active: Set(true),
            config: Set(config),
            created_at: Set(Utc::now().into()),
        };

        activation.insert(self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                RepositoryError::Conflict("integration activation")
            } else {
                RepositoryError::Database(err)
            }
        })
    }
}
