//! HTTP handlers for cashier and sales endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::sales::{CheckoutInput, CheckoutResult, SalesFilter, SalesReport, SalesService};
use crate::AppState;

/// Record a cashier checkout
pub async fn checkout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CheckoutInput>,
) -> AppResult<(StatusCode, Json<CheckoutResult>)> {
    let service = SalesService::new(state.db);
    let result = service.checkout(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Paginated sales history with range totals
pub async fn list_sales(
    State(state): State<AppState>,
    Query(filter): Query<SalesFilter>,
) -> AppResult<Json<SalesReport>> {
    let service = SalesService::new(state.db);
    let report = service.list_sales(filter).await?;
    Ok(Json(report))
}
