//! HTTP handlers for production endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::production::{ProductionInput, ProductionReportEntry, ProductionService};
use crate::AppState;
use shared::models::ProductionLog;

#[derive(Deserialize)]
pub struct ProductionQuery {
    pub product_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
}

/// Record a production batch
pub async fn record_batch(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<ProductionInput>,
) -> AppResult<(StatusCode, Json<ProductionLog>)> {
    let service = ProductionService::new(state.db);
    let log = service.record_batch(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Production history with yield classification
pub async fn list_batches(
    State(state): State<AppState>,
    Query(query): Query<ProductionQuery>,
) -> AppResult<Json<Vec<ProductionReportEntry>>> {
    let service = ProductionService::new(state.db);
    let batches = service
        .list_batches(query.product_id, query.start_date, query.end_date, query.limit)
        .await?;
    Ok(Json(batches))
}
