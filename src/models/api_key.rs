//! API key entity model
//!
//! Merchant-scoped API credentials. The key value is generated server-side
//! and the full secret appears only in the create response.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use utoipa::ToSchema;

/// API key entity representing a merchant-scoped credential
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "api_keys")]
#[serde(rename_all = "camelCase")]
#[schema(as = ApiKey)]
pub struct Model {
    /// Unique identifier for the API key (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning merchant
    pub merchant_id: Uuid,

    /// Server-generated secret token, unique platform-wide
    #[sea_orm(unique)]
    pub key: String,

    /// Display name chosen by the merchant
    pub name: String,

    /// Whether the key is currently usable
    pub is_active: bool,

    /// Timestamp when the key was created
    #[schema(value_type = String, example = "2025-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp of last use (optional)
    #[schema(value_type = Option<String>, example = "2025-01-01T12:00:00Z")]
    pub last_used: Option<DateTimeWithTimeZone>,
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
