//! Payment link entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use utoipa::ToSchema;

/// Payment link entity owned by a merchant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "payment_links")]
#[serde(rename_all = "camelCase")]
#[schema(as = PaymentLink)]
pub struct Model {
    /// Unique identifier for the payment link (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning merchant
    pub merchant_id: Uuid,

    /// Short title displayed on the hosted page
    pub title: String,

    /// Longer description (optional)
    pub description: Option<String>,

    /// Fixed amount in minor units; absent means customer-chosen amount
    pub amount: Option<i64>,

    /// ISO-4217 currency code
    pub currency: String,

    /// Whether the link currently accepts payments
    pub is_active: bool,

    /// Expiry timestamp (optional)
    #[schema(value_type = Option<String>, example = "2025-01-01T12:00:00Z")]
    pub expires_at: Option<DateTimeWithTimeZone>,

    /// Free-form metadata attached by the merchant
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,

    /// Timestamp when the link was created
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
