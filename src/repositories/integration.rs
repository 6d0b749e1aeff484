//! # Integration Repository
//!
//! Global integration catalog. Reads are open to everyone; mutations come
//! only through admin-gated handlers.

use crate::error::RepositoryError;
use crate::models::integration::{
    ActiveModel as IntegrationActiveModel, Column, Entity as Integration, Model as IntegrationModel,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use serde_json::Value;
use uuid::Uuid;

/// Request data for adding a catalog entry
#[derive(Debug, Clone)]
pub struct CreateIntegrationRequest {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    pub config: Option<Value>,
}

/// Fields that may change on a catalog entry
#[derive(Debug, Clone, Default)]
pub struct UpdateIntegrationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub config: Option<Value>,
}

/// Repository for Integration database operations
pub struct IntegrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IntegrationRepository<'a, C> {
    /// Create a new IntegrationRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List active catalog entries, alphabetically
    pub async fn list_active(&self) -> Result<Vec<IntegrationModel>, RepositoryError> {
        let integrations = Integration::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Name)
            .all(self.db)
            .await?;
        Ok(integrations)
    }

    /// Get a catalog entry by ID
    pub async fn get_integration_by_id(
        &self,
        integration_id: Uuid,
    ) -> Result<Option<IntegrationModel>, RepositoryError> {
        let integration = Integration::find_by_id(integration_id).one(self.db).await?;
        Ok(integration)
    }

    /// Add a catalog entry (admin operation)
    pub async fn create_integration(
        &self,
        request: CreateIntegrationRequest,
    ) -> Result<IntegrationModel, RepositoryError> {
        let integration = IntegrationActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            description: Set(request.description),
            logo_url: Set(request.logo_url),
            category: Set(request.category),
            is_active: Set(true),
            config: Set(request.config),
            created_at: Set(Utc::now().into()),
        };

        let result = integration.insert(self.db).await?;
        Ok(result)
    }

    /// Update a catalog entry (admin operation)
    pub async fn update_integration(
        &self,
        integration_id: Uuid,
        request: UpdateIntegrationRequest,
    ) -> Result<IntegrationModel, RepositoryError> {
        // An empty change set would render an invalid UPDATE statement
        if request.name.is_none()
            && request.description.is_none()
            && request.logo_url.is_none()
            && request.category.is_none()
            && request.is_active.is_none()
            && request.config.is_none()
        {
            return Integration::find_by_id(integration_id)
                .one(self.db)
                .await?
                .ok_or(RepositoryError::NotFound("integration"));
        }

        let update = IntegrationActiveModel {
            name: request.name.map_or(NotSet, Set),
            description: request.description.map_or(NotSet, |v| Set(Some(v))),
            logo_url: request.logo_url.map_or(NotSet, |v| Set(Some(v))),
            category: request.category.map_or(NotSet, |v| Set(Some(v))),
            is_active: request.is_active.map_or(NotSet, Set),
            config: request.config.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        let result = Integration::update_many()
            .set(update)
            .filter(Column::Id.eq(integration_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("integration"));
        }

        Integration::find_by_id(integration_id)
            .one(self.db)
            .await?
            .ok_or(RepositoryError::NotFound("integration"))
    }

    /// Remove a catalog entry (admin operation)
    pub async fn delete_integration(&self, integration_id: Uuid) -> Result<(), RepositoryError> {
        let result = Integration::delete_many()
            .filter(Column::Id.eq(integration_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("integration"));
        }
        Ok(())
    }
}
