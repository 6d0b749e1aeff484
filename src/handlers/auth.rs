//! # Auth API Handlers
//!
//! Registration and login. Registration creates the user and, for the
//! merchant role, the merchant profile in one transaction.

use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::{ApiError, unauthorized, validation_error};
use crate::handlers::Json;
use crate::models::merchant::Model as MerchantModel;
use crate::models::user::{Model as UserModel, UserRole};
use crate::repositories::merchant::CreateMerchantRequest;
use crate::repositories::user::CreateUserRequest;
use crate::repositories::{MerchantRepository, UserRepository};
use crate::server::AppState;

/// Request payload for registering an account
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    /// Login name, at least 3 characters
    #[schema(example = "alice")]
    pub username: String,
    /// Contact email
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password, at least 8 characters
    pub password: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Account role; defaults to merchant
    pub role: Option<UserRole>,
    /// Business name for merchant accounts
    pub business_name: Option<String>,
    /// Business category for merchant accounts
    pub business_type: Option<String>,
    /// Public website for merchant accounts
    pub website_url: Option<String>,
}

/// Request payload for logging in
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    pub username: String,
    pub password: String,
}

/// User representation returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<UserModel> for UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Response payload for register and login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    /// Signed session token for the Authorization header
    pub token: String,
    pub user: UserDto,
    /// Present for merchant accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<MerchantModel>,
}

fn validate_registration(request: &RegisterRequestDto) -> Result<(), ApiError> {
    let mut field_errors = serde_json::Map::new();

    if request.username.trim().len() < 3 {
        field_errors.insert(
            "username".to_string(),
            "Must be at least 3 characters".into(),
        );
    }
    if !request.email.contains('@') || request.email.trim().len() < 3 {
        field_errors.insert("email".to_string(), "Must be a valid email address".into());
    }
    if request.password.len() < 8 {
        field_errors.insert(
            "password".to_string(),
            "Must be at least 8 characters".into(),
        );
    }
    if let Some(website_url) = request
        .website_url
        .as_deref()
        .filter(|candidate| !candidate.is_empty())
    {
        if url::Url::parse(website_url).is_err() {
            field_errors.insert("websiteUrl".to_string(), "Must be a valid URL".into());
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(
            "Registration payload invalid",
            serde_json::Value::Object(field_errors),
        ))
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Username or email already taken", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequestDto>,
) -> Result<(StatusCode, Json<AuthResponseDto>), ApiError> {
    validate_registration(&request)?;

    let role = request.role.unwrap_or(UserRole::Merchant);
    let password_hash = hash_password(&request.password)?;

    let txn = state.db.begin().await.map_err(ApiError::from)?;

    let user = UserRepository::new(&txn)
        .create_user(CreateUserRequest {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash,
            full_name: request.full_name,
            role,
        })
        .await?;

    let merchant = if role == UserRole::Merchant {
        let business_name = request
            .business_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("{}'s Business", user.username));
        let merchant = MerchantRepository::new(&txn)
            .create_merchant(CreateMerchantRequest {
                user_id: user.id,
                business_name,
                business_type: Some(request.business_type.unwrap_or_else(|| "Other".to_string())),
                website_url: Some(request.website_url.unwrap_or_default()),
            })
            .await?;
        Some(merchant)
    } else {
        None
    };

    txn.commit().await.map_err(ApiError::from)?;

    let token = issue_token(&state.config, &user)?;
    tracing::info!(user_id = %user.id, role = ?user.role, "Registered new account");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            token,
            user: user.into(),
            merchant,
        }),
    ))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Session issued", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequestDto>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let user = UserRepository::new(&state.db)
        .get_user_by_username(request.username.trim())
        .await?;

    // Same answer whether the user is missing or the password is wrong
    let Some(user) = user else {
        return Err(unauthorized(Some("Invalid username or password")));
    };
    if !verify_password(&request.password, &user.password_hash) {
        return Err(unauthorized(Some("Invalid username or password")));
    }

    let merchant = if user.role == UserRole::Merchant {
        MerchantRepository::new(&state.db)
            .get_merchant_by_user_id(user.id)
            .await?
    } else {
        None
    };

    let token = issue_token(&state.config, &user)?;
    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(Json(AuthResponseDto {
        token,
        user: user.into(),
        merchant,
    }))
}
