//! # API Key Repository
//!
//! Merchant-scoped API credentials. Key values are generated here and never
//! accepted from clients.

use crate::error::{RepositoryError, is_unique_violation};
use crate::models::api_key::{
    ActiveModel as ApiKeyActiveModel, Column, Entity as ApiKey, Model as ApiKeyModel,
};
use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Prefix marking a publishable-style key
const KEY_PREFIX: &str = "pk_";
/// Random alphanumeric characters after the prefix
const KEY_RANDOM_LEN: usize = 32;
/// Collisions are astronomically unlikely at this length; retry a few times anyway
const KEY_INSERT_ATTEMPTS: usize = 3;

/// Generate a fresh key value
fn generate_key_value() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", KEY_PREFIX, random)
}

/// Repository for ApiKey database operations
pub struct ApiKeyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApiKeyRepository<'a, C> {
    /// Create a new ApiKeyRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List a merchant's API keys, newest first
    pub async fn list_for_merchant(
        &self,
        merchant_id: Uuid,
    ) -> Result<Vec<ApiKeyModel>, RepositoryError> {
        let keys = ApiKey::find()
            .filter(Column::MerchantId.eq(merchant_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(keys)
    }

    /// Create a new API key with a server-generated value.
    ///
    /// Retries with a fresh value if the unique index reports a collision.
    pub async fn create_key(
        &self,
        merchant_id: Uuid,
        name: String,
    ) -> Result<ApiKeyModel, RepositoryError> {
        let mut last_err = None;
        for _ in 0..KEY_INSERT_ATTEMPTS {
            let key = ApiKeyActiveModel {
                id: Set(Uuid::new_v4()),
                merchant_id: Set(merchant_id),
                key: Set(generate_key_value()),
                name: Set(name.clone()),
                is_active: Set(true),
                created_at: Set(Utc::now().into()),
                last_used: Set(None),
            };

            match key.insert(self.db).await {
                Ok(model) => return Ok(model),
                Err(err) if is_unique_violation(&err) => {
                    last_err = Some(err);
                }
                Err(err) => return Err(RepositoryError::Database(err)),
            }
        }

        Err(RepositoryError::Database(last_err.unwrap_or_else(|| {
            sea_orm::DbErr::Custom("api key generation exhausted retries".to_string())
        })))
    }

    /// Delete one of the merchant's API keys
    pub async fn delete_key(
        &self,
        merchant_id: Uuid,
        key_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = ApiKey::delete_many()
            .filter(Column::Id.eq(key_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("api key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_carry_prefix_and_length() {
        let key = generate_key_value();
        assert!(key.starts_with("pk_"));
        assert_eq!(key.len(), KEY_PREFIX.len() + KEY_RANDOM_LEN);
        assert!(key[KEY_PREFIX.len()..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_keys_are_distinct() {
        let a = generate_key_value();
        let b = generate_key_value();
        assert_ne!(a, b);
    }
}
