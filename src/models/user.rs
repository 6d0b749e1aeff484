//! User entity model
//!
//! This module contains the SeaORM entity model for the users table, the
//! authentication principals of the gateway.
//!
//! The model deliberately does not implement `Serialize`: responses go
//! through a DTO that omits the password hash.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role assigned to a principal at registration.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "merchant")]
    Merchant,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// User entity representing an authentication principal
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login name, unique across the platform
    #[sea_orm(unique)]
    pub username: String,

    /// Contact email, unique across the platform
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id PHC-format password hash; never serialized
    pub password_hash: String,

    /// Display name (optional)
    pub full_name: Option<String>,

    /// Role deciding which gates the principal passes
    pub role: UserRole,

    /// Avatar image URL (optional)
    pub avatar_url: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::merchant::Entity")]
    Merchant,
}

impl Related<super::merchant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
