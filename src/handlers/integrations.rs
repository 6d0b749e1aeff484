//! # Integration Catalog Handlers
//!
//! Public catalog listing plus the admin-gated mutations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::{ApiError, not_found, validation_error};
use crate::handlers::Json;
use crate::models::integration::Model as IntegrationModel;
use crate::repositories::IntegrationRepository;
use crate::repositories::integration::{CreateIntegrationRequest, UpdateIntegrationRequest};
use crate::server::AppState;

/// Request payload for adding a catalog entry
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationDto {
    /// Display name, at least 3 characters
    #[schema(example = "Slack")]
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    pub config: Option<serde_json::Value>,
}

/// Request payload for updating a catalog entry
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrationDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub config: Option<serde_json::Value>,
}

fn validate_catalog_fields(name: Option<&str>, logo_url: Option<&str>) -> Result<(), ApiError> {
    let mut field_errors = serde_json::Map::new();
    if let Some(name) = name {
        if name.trim().len() < 3 {
            field_errors.insert("name".to_string(), "Must be at least 3 characters".into());
        }
    }
    if let Some(logo_url) = logo_url.filter(|u| !u.is_empty()) {
        if url::Url::parse(logo_url).is_err() {
            field_errors.insert("logoUrl".to_string(), "Must be a valid URL".into());
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(
            "Integration payload invalid",
            serde_json::Value::Object(field_errors),
        ))
    }
}

/// List active catalog integrations (public)
#[utoipa::path(
    get,
    path = "/api/integrations",
    responses(
        (status = 200, description = "Active integrations", body = [IntegrationModel])
    ),
    tag = "integrations"
)]
pub async fn list_integrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<IntegrationModel>>, ApiError> {
    let integrations = IntegrationRepository::new(&state.db).list_active().await?;
    Ok(Json(integrations))
}

/// Fetch one active catalog integration (public)
#[utoipa::path(
    get,
    path = "/api/integrations/{id}",
    params(("id" = Uuid, Path, description = "Integration id")),
    responses(
        (status = 200, description = "Active integration", body = IntegrationModel),
        (status = 404, description = "Integration not found", body = ApiError)
    ),
    tag = "integrations"
)]
pub async fn get_integration(
    State(state): State<AppState>,
    Path(integration_id): Path<Uuid>,
) -> Result<Json<IntegrationModel>, ApiError> {
    // Deactivated entries stay hidden from the public catalog
    let integration = IntegrationRepository::new(&state.db)
        .get_integration_by_id(integration_id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| not_found("Integration"))?;
    Ok(Json(integration))
}

/// Add a catalog integration (admin)
#[utoipa::path(
    post,
    path = "/api/integrations",
    security(("bearer_auth" = [])),
    request_body = CreateIntegrationDto,
    responses(
        (status = 201, description = "Created integration", body = IntegrationModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "integrations"
)]
pub async fn create_integration(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateIntegrationDto>,
) -> Result<(StatusCode, Json<IntegrationModel>), ApiError> {
    validate_catalog_fields(Some(&request.name), request.logo_url.as_deref())?;

    let integration = IntegrationRepository::new(&state.db)
        .create_integration(CreateIntegrationRequest {
            name: request.name.trim().to_string(),
            description: request.description,
            logo_url: request.logo_url,
            category: request.category,
            config: request.config,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(integration)))
}

/// Update a catalog integration (admin)
#[utoipa::path(
    put,
    path = "/api/integrations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Integration id")),
    request_body = UpdateIntegrationDto,
    responses(
        (status = 200, description = "Updated integration", body = IntegrationModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Integration not found", body = ApiError)
    ),
    tag = "integrations"
)]
pub async fn update_integration(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(integration_id): Path<Uuid>,
    Json(request): Json<UpdateIntegrationDto>,
) -> Result<Json<IntegrationModel>, ApiError> {
    validate_catalog_fields(request.name.as_deref(), request.logo_url.as_deref())?;

    let integration = IntegrationRepository::new(&state.db)
        .update_integration(
            integration_id,
            UpdateIntegrationRequest {
                name: request.name,
                description: request.description,
                logo_url: request.logo_url,
                category: request.category,
                is_active: request.is_active,
                config: request.config,
            },
        )
        .await?;
    Ok(Json(integration))
}

/// Remove a catalog integration (admin)
#[utoipa::path(
    delete,
    path = "/api/integrations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Integration id")),
    responses(
        (status = 204, description = "Integration removed"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Integration not found", body = ApiError)
    ),
    tag = "integrations"
)]
pub async fn delete_integration(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(integration_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    IntegrationRepository::new(&state.db)
        .delete_integration(integration_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
