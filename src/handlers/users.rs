//! # User API Handlers

use axum::extract::State;

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::handlers::Json;
use crate::handlers::auth::UserDto;
use crate::repositories::UserRepository;
use crate::server::AppState;

/// Return the authenticated principal's own account
#[utoipa::path(
    get,
    path = "/api/users/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ApiError)
    ),
    tag = "users"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserDto> {
    Json(user.into())
}

/// List every user account (admin)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserDto]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = UserRepository::new(&state.db).list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
