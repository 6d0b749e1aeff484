//! Integration catalog entity model
//!
//! Global catalog, not merchant-owned: readable by anyone, writable by admins.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use utoipa::ToSchema;

/// Catalog entry describing a third-party integration merchants can enable
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "integrations")]
#[serde(rename_all = "camelCase")]
#[schema(as = Integration)]
pub struct Model {
    /// Unique identifier for the integration (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Longer description (optional)
    pub description: Option<String>,

    /// Logo image URL (optional)
    pub logo_url: Option<String>,

    /// Catalog category such as "analytics" or "accounting" (optional)
    pub category: Option<String>,

    /// Whether the integration is available to merchants
    pub is_active: bool,

    /// Catalog-level default configuration
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub config: Option<Json>,

    /// Timestamp when the entry was created
    #[schema(value_type = String, example = "2025-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::merchant_integration::Entity")]
    MerchantIntegration,
}

impl Related<super::merchant_integration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchantIntegration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
