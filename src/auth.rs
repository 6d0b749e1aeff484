//! # Authentication and Authorization
//!
//! This module provides session token issuance and verification, password
//! hashing, and the extractors that gate protected API endpoints by role.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, forbidden, not_found, unauthorized};
use crate::models::merchant::Model as MerchantModel;
use crate::models::user::{Model as UserModel, UserRole};
use crate::repositories::{MerchantRepository, UserRepository};
use crate::server::AppState;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: Uuid,
    /// Role at issuance time
    pub role: UserRole,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Issue a signed session token for the user
pub fn issue_token(config: &AppConfig, user: &UserModel) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        role: user.role,
        iat: now,
        exp: now + config.session_ttl_seconds as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .map_err(|err| anyhow::anyhow!("failed to sign session token: {}", err).into())
}

/// Verify a session token and return its claims
pub fn decode_token(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized(Some("Invalid or expired session token")))
}

/// Hash a password with Argon2id and a fresh salt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow::anyhow!("failed to hash password: {}", err).into())
}

/// Check a password against a stored PHC-format hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn extract_bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))?
        .to_str()
        .map_err(|_| unauthorized(Some("Invalid Authorization header")))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
}

/// Extractor for any authenticated principal
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = extract_bearer_token(parts)?;
        let claims = decode_token(&state.config, token)?;

        let user = UserRepository::new(&state.db)
            .get_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| unauthorized(Some("Session user no longer exists")))?;

        Ok(CurrentUser(user))
    }
}

/// Extractor for admin-gated endpoints
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserModel);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(forbidden(Some("Admin role required")));
        }
        Ok(AdminUser(user))
    }
}

/// Extractor for merchant-gated endpoints.
///
/// Resolves the caller's merchant profile from the session, never from
/// client-supplied ids.
#[derive(Debug, Clone)]
pub struct MerchantContext {
    pub user: UserModel,
    pub merchant: MerchantModel,
}

impl<S> FromRequestParts<S> for MerchantContext
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let state = AppState::from_ref(state);
        if user.role != UserRole::Merchant {
            return Err(forbidden(Some("Merchant role required")));
        }

        let merchant = MerchantRepository::new(&state.db)
            .get_merchant_by_user_id(user.id)
            .await?
            .ok_or_else(|| not_found("Merchant profile"))?;

        Ok(MerchantContext { user, merchant })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            session_secret: "unit-test-session-secret".to_string(),
            session_ttl_seconds: 3600,
            ..Default::default()
        }
    }

    fn test_user(role: UserRole) -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            full_name: None,
            role,
            avatar_url: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let config = test_config();
        let user = test_user(UserRole::Merchant);

        let token = issue_token(&config, &user).unwrap();
        let claims = decode_token(&config, &token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Merchant);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let user = test_user(UserRole::Admin);
        let token = issue_token(&config, &user).unwrap();

        let other = AppConfig {
            session_secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };
        assert!(decode_token(&other, &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(decode_token(&config, "not-a-jwt").is_err());
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-hash"));
    }
}
