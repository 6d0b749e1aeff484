//! # Subscription Repository
//!
//! Merchant-scoped subscription plan definitions with full CRUD.

use crate::error::RepositoryError;
use crate::models::subscription::{
    ActiveModel as SubscriptionActiveModel, Column, Entity as Subscription,
    Model as SubscriptionModel, PlanInterval,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Request data for creating a subscription plan
#[derive(Debug, Clone)]
pub struct CreateSubscriptionRequest {
    pub name: String,
    /// Recurring amount in minor units
    pub amount: i64,
    pub currency: String,
    pub interval: PlanInterval,
    pub metadata: Option<Value>,
}

/// Fields that may change on an existing plan
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionRequest {
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<PlanInterval>,
    pub is_active: Option<bool>,
    pub metadata: Option<Value>,
}

/// Repository for Subscription database operations
pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    /// Create a new SubscriptionRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List a merchant's plans, newest first
    pub async fn list_for_merchant(
        &self,
        merchant_id: Uuid,
    ) -> Result<Vec<SubscriptionModel>, RepositoryError> {
        let plans = Subscription::find()
            .filter(Column::MerchantId.eq(merchant_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(plans)
    }

    /// Create a plan for the merchant
    pub async fn create_subscription(
        &self,
        merchant_id: Uuid,
        request: CreateSubscriptionRequest,
    ) -> Result<SubscriptionModel, RepositoryError> {
        let plan = SubscriptionActiveModel {
            id: Set(Uuid::new_v4()),
            merchant_id: Set(merchant_id),
            name: Set(request.name),
            amount: Set(request.amount),
            currency: Set(request.currency),
            interval: Set(request.interval),
            is_active: Set(true),
            metadata: Set(request.metadata),
            created_at: Set(Utc::now().into()),
        };

        let result = plan.insert(self.db).await?;
        Ok(result)
    }

    /// Update one of the merchant's plans
    pub async fn update_subscription(
        &self,
        merchant_id: Uuid,
        subscription_id: Uuid,
        request: UpdateSubscriptionRequest,
    ) -> Result<SubscriptionModel, RepositoryError> {
        // An empty change set would render an invalid UPDATE statement
        if request.name.is_none()
            && request.amount.is_none()
            && request.currency.is_none()
            && request.interval.is_none()
            && request.is_active.is_none()
            && request.metadata.is_none()
        {
            return Subscription::find()
                .filter(Column::Id.eq(subscription_id))
                .filter(Column::MerchantId.eq(merchant_id))
                .one(self.db)
                .await?
                .ok_or(RepositoryError::NotFound("subscription"));
        }

        let update = SubscriptionActiveModel {
            name: request.name.map_or(NotSet, Set),
            amount: request.amount.map_or(NotSet, Set),
            currency: request.currency.map_or(NotSet, Set),
            interval: request.interval.map_or(NotSet, Set),
            is_active: request.is_active.map_or(NotSet, Set),
            metadata: request.metadata.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        let result = Subscription::update_many()
            .set(update)
            .filter(Column::Id.eq(subscription_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("subscription"));
        }

        Subscription::find_by_id(subscription_id)
            .one(self.db)
            .await?
            .ok_or(RepositoryError::NotFound("subscription"))
    }

    /// Delete one of the merchant's plans
    pub async fn delete_subscription(
        &self,
        merchant_id: Uuid,
        subscription_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = Subscription::delete_many()
            .filter(Column::Id.eq(subscription_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("subscription"));
        }
        Ok(())
    }
}
