//! Subscription plan entity model
//!
//! Rows are plan definitions owned by a merchant, not per-customer
//! subscription instances.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Billing interval for a subscription plan
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    #[sea_orm(string_value = "day")]
    Day,
    #[sea_orm(string_value = "week")]
    Week,
    #[sea_orm(string_value = "month")]
    Month,
    #[sea_orm(string_value = "year")]
    Year,
}

/// Subscription plan entity owned by a merchant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "subscriptions")]
#[serde(rename_all = "camelCase")]
#[schema(as = Subscription)]
pub struct Model {
    /// Unique identifier for the subscription plan (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning merchant
    pub merchant_id: Uuid,

    /// Plan name shown to customers
    pub name: String,

    /// Recurring amount in minor units
    pub amount: i64,

    /// ISO-4217 currency code
    pub currency: String,

    /// Billing interval
    pub interval: PlanInterval,

    /// Whether the plan is open for new signups
    pub is_active: bool,

    /// Free-form metadata attached by the merchant
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,

    /// Timestamp when the plan was created
    #[schema(value_type = String, example = "2025-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::merchant::Entity",
        from = "Column::MerchantId",
        to = "super::merchant::Column::Id"
    )]
    Merchant,
}

impl Related<super::merchant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
