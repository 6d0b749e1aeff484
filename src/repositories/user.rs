//! # User Repository
//!
//! This module contains the repository implementation for User entities,
//! covering account creation and the lookups the auth layer needs.

use crate::error::{RepositoryError, is_unique_violation};
use crate::models::user::{
    ActiveModel as UserActiveModel, Entity as User, Model as UserModel, UserRole,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Request data for creating a new user account
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2 hash of the password, produced by the auth layer
    pub password_hash: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Role assigned at registration
    pub role: UserRole,
}

/// Repository for User database operations
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Create a new UserRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a new user account
    ///
    /// Username and email are checked for duplicates up front so the caller
    /// gets a clear conflict message; the unique indexes still back this up
    /// under concurrent registration.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<UserModel, RepositoryError> {
        let existing = User::find()
            .filter(
                crate::models::user::Column::Username
                    .eq(request.username.as_str())
                    .or(crate::models::user::Column::Email.eq(request.email.as_str())),
            )
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            if existing.username == request.username {
                return Err(RepositoryError::Conflict("username"));
            }
            return Err(RepositoryError::Conflict("email"));
        }

        let user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(request.username),
            email: Set(request.email),
            password_hash: Set(request.password_hash),
            full_name: Set(request.full_name),
            role: Set(request.role),
            avatar_url: Set(None),
            created_at: Set(Utc::now().into()),
        };

        user.insert(self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                RepositoryError::Conflict("username or email")
            } else {
                RepositoryError::Database(err)
            }
        })
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        let user = User::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    /// Get a user by username, for login
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        let user = User::find()
            .filter(crate::models::user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<UserModel>, RepositoryError> {
        let users = User::find().all(self.db).await?;
        Ok(users)
    }
}
