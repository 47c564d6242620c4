//! HTTP handlers for system settings (admin only)

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::settings::{ResetSummary, SettingsService};
use crate::AppState;

/// Wipe all operational data, preserving staff profiles
pub async fn factory_reset(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ResetSummary>> {
    require_admin(&current_user.0)?;
    let service = SettingsService::new(state.db);
    let summary = service.factory_reset().await?;
    Ok(Json(summary))
}
