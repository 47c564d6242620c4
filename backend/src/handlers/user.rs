//! HTTP handlers for staff account management (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::user::{CreateUserInput, UpdateUserInput, UserService};
use crate::AppState;
use shared::models::Profile;

/// List all staff profiles
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Profile>>> {
    require_admin(&current_user.0)?;
    let service = UserService::new(state.db);
    let profiles = service.list().await?;
    Ok(Json(profiles))
}

/// Register a new staff account
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    require_admin(&current_user.0)?;
    let service = UserService::new(state.db);
    let profile = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update a staff account
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<Profile>> {
    require_admin(&current_user.0)?;
    let service = UserService::new(state.db);
    let profile = service.update(id, input).await?;
    Ok(Json(profile))
}

/// Deactivate a staff account
pub async fn deactivate_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user.0)?;
    let service = UserService::new(state.db);
    service.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reactivate a staff account
pub async fn reactivate_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user.0)?;
    let service = UserService::new(state.db);
    service.reactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
