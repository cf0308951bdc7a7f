//! Handlers for the `/users` resource. Password hashes never leave here.

use axum::extract::{Path, State};
use axum::Json;
use ideahub_core::error::CoreError;
use ideahub_core::roles::Role;
use ideahub_core::types::DbId;
use ideahub_db::models::user::{User, UserProfile};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

fn profiles(users: &[User]) -> Vec<UserProfile> {
    users.iter().map(UserProfile::from).collect()
}

/// GET /api/v1/users
pub async fn list_users(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let users = state.users.list_all().await?;
    Ok(Json(DataResponse {
        data: profiles(&users),
    }))
}

/// GET /api/v1/users/role/{role}
pub async fn users_by_role(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let role: Role = role.parse()?;
    let users = state.users.list_by_role(role).await?;
    Ok(Json(DataResponse {
        data: profiles(&users),
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: UserProfile::from(&user),
    }))
}
