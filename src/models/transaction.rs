//! Transaction entity model
//!
//! Merchant-scoped payment records. Amounts are integer minor units.
//! Transactions are never deleted; only their status is patched.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Settlement status of a transaction.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "succeeded")]
    Succeeded,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Transaction entity representing a merchant-scoped payment record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "transactions")]
#[serde(rename_all = "camelCase")]
#[schema(as = Transaction)]
pub struct Model {
    /// Unique identifier for the transaction (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning merchant
    pub merchant_id: Uuid,

    /// Amount in integer minor units (cents)
    pub amount: i64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Settlement status
    pub status: TransactionStatus,

    /// Payment instrument label (optional)
    pub payment_method: Option<String>,

    /// Customer contact email (optional)
    pub customer_email: Option<String>,

    /// Opaque metadata blob (optional)
    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: Option<JsonValue>,

    /// Timestamp when the transaction was created
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
