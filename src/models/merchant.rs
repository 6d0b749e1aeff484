//! Merchant entity model
//!
//! This module contains the SeaORM entity model for the merchants table.
//! Exactly one merchant profile exists per merchant-role user; every
//! merchant-scoped entity hangs off this row.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// KYC verification status of a merchant.
///
/// Merchant-reachable: `pending` (via submit, from any state). Admin-settable:
/// `approved` and `rejected` only.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[sea_orm(string_value = "not_started")]
    NotStarted,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Merchant entity representing a business profile owned by a user
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "merchants")]
#[serde(rename_all = "camelCase")]
#[schema(as = Merchant)]
pub struct Model {
    /// Unique identifier for the merchant (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user; unique, one merchant per user
    #[sea_orm(unique)]
    pub user_id: Uuid,

    /// Registered business name
    pub business_name: String,

    /// Business category (optional)
    pub business_type: Option<String>,

    /// Business website URL (optional)
    pub website_url: Option<String>,

    /// Current KYC verification status
    pub kyc_status: KycStatus,

    /// Opaque KYC blob: document refs, review timestamps, rejection reason
    #[sea_orm(column_type = "JsonBinary")]
    pub kyc_data: Option<JsonValue>,

    /// Timestamp when the merchant was created
    #[schema(value_type = String, example = "2025-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
