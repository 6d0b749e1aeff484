//! Merchant integration entity model
//!
//! Join record linking a merchant to a catalog integration with per-merchant
//! configuration. One activation per (merchant, integration) pair.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use utoipa::ToSchema;

/// A merchant's activation of a catalog integration
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "merchant_integrations")]
#[serde(rename_all = "camelCase")]
#[schema(as = MerchantIntegration)]
pub struct Model {
    /// Unique identifier for the activation (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning merchant
    pub merchant_id: Uuid,

    /// Catalog integration being activated
    pub integration_id: Uuid,

    /// Whether the activation is currently enabled
    pub is_active: bool,

    /// Per-merchant configuration for the integration
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub config: Option<Json>,

    /// Timestamp when the activation was created
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
    #[sea_orm(
        belongs_to = "super::integration::Entity",
        from = "Column::IntegrationId",
        to = "super::integration::Column::Id"
    )]
    Integration,
}

impl Related<super::merchant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchant.def()
    }
}

impl Related<super::integration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Integration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
