//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthService, LoginInput, LoginResponse};
use crate::services::UserService;
use crate::AppState;
use shared::models::Profile;

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Profile of the authenticated user
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Profile>> {
    let service = UserService::new(state.db);
    let profile = service.get(current_user.0.user_id).await?;
    Ok(Json(profile))
}
