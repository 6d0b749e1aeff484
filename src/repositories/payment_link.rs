//! # Payment Link Repository
//!
//! Merchant-scoped payment links with full CRUD. Mutations filter on
//! `id AND merchant_id` in one statement.

use crate::error::RepositoryError;
use crate::models::payment_link::{
    ActiveModel as PaymentLinkActiveModel, Column, Entity as PaymentLink, Model as PaymentLinkModel,
};
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Request data for creating a payment link
#[derive(Debug, Clone)]
pub struct CreatePaymentLinkRequest {
    pub title: String,
    pub description: Option<String>,
    /// Fixed amount in minor units; absent means customer-chosen
    pub amount: Option<i64>,
    pub currency: String,
    pub expires_at: Option<DateTimeWithTimeZone>,
    pub metadata: Option<Value>,
}

/// Fields that may change on an existing payment link
#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentLinkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
    pub expires_at: Option<DateTimeWithTimeZone>,
    pub metadata: Option<Value>,
}

/// Repository for PaymentLink database operations
pub struct PaymentLinkRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentLinkRepository<'a, C> {
    /// Create a new PaymentLinkRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List a merchant's payment links, newest first
    pub async fn list_for_merchant(
        &self,
        merchant_id: Uuid,
    ) -> Result<Vec<PaymentLinkModel>, RepositoryError> {
        let links = PaymentLink::find()
            .filter(Column::MerchantId.eq(merchant_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(links)
    }

    /// Create a payment link for the merchant
    pub async fn create_link(
        &self,
        merchant_id: Uuid,
        request: CreatePaymentLinkRequest,
    ) -> Result<PaymentLinkModel, RepositoryError> {
        let link = PaymentLinkActiveModel {
            id: Set(Uuid::new_v4()),
            merchant_id: Set(merchant_id),
            title: Set(request.title),
            description: Set(request.description),
            amount: Set(request.amount),
            currency: Set(request.currency),
            is_active: Set(true),
            expires_at: Set(request.expires_at),
            metadata: Set(request.metadata),
            created_at: Set(Utc::now().into()),
        };

        let result = link.insert(self.db).await?;
        Ok(result)
    }

    /// Update one of the merchant's payment links
    pub async fn update_link(
        &self,
        merchant_id: Uuid,
        link_id: Uuid,
        request: UpdatePaymentLinkRequest,
    ) -> Result<PaymentLinkModel, RepositoryError> {
        // An empty change set would render an invalid UPDATE statement
        if request.title.is_none()
            && request.description.is_none()
            && request.amount.is_none()
            && request.currency.is_none()
            && request.is_active.is_none()
            && request.expires_at.is_none()
            && request.metadata.is_none()
        {
            return PaymentLink::find()
                .filter(Column::Id.eq(link_id))
                .filter(Column::MerchantId.eq(merchant_id))
                .one(self.db)
                .await?
                .ok_or(RepositoryError::NotFound("payment link"));
        }

        let update = PaymentLinkActiveModel {
            title: request.title.map_or(NotSet, Set),
            description: request.description.map_or(NotSet, |v| Set(Some(v))),
            amount: request.amount.map_or(NotSet, |v| Set(Some(v))),
            currency: request.currency.map_or(NotSet, Set),
            is_active: request.is_active.map_or(NotSet, Set),
            expires_at: request.expires_at.map_or(NotSet, |v| Set(Some(v))),
            metadata: request.metadata.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        let result = PaymentLink::update_many()
            .set(update)
            .filter(Column::Id.eq(link_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("payment link"));
        }

        PaymentLink::find_by_id(link_id)
            .one(self.db)
            .await?
            .ok_or(RepositoryError::NotFound("payment link"))
    }

    /// Delete one of the merchant's payment links
    pub async fn delete_link(
        &self,
        merchant_id: Uuid,
        link_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = PaymentLink::delete_many()
            .filter(Column::Id.eq(link_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("payment link"));
        }
        Ok(())
    }
}
