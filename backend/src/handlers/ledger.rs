//! HTTP handlers for stock ledger endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{LedgerEntry, LedgerFilter, LedgerService, RestockInput};
use crate::AppState;
use shared::models::IngredientLog;

/// Record a manual restock
pub async fn restock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RestockInput>,
) -> AppResult<(StatusCode, Json<IngredientLog>)> {
    let service = LedgerService::new(state.db);
    let log = service.restock(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Stock mutation report
pub async fn list_logs(
    State(state): State<AppState>,
    Query(filter): Query<LedgerFilter>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    let service = LedgerService::new(state.db);
    let entries = service.list_logs(filter).await?;
    Ok(Json(entries))
}
