//! HTTP handlers for reporting and data export endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::{BestSeller, DashboardMetrics, ReportingService};
use shared::timeseries::RevenueBucket;
use crate::AppState;
use shared::models::Ingredient;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.db);
    let metrics = service.dashboard().await?;
    Ok(Json(metrics))
}

/// Ingredients at or below their alert threshold
pub async fn get_critical_stock(State(state): State<AppState>) -> AppResult<Json<Vec<Ingredient>>> {
    let service = ReportingService::new(state.db);
    let ingredients = service.critical_stock().await?;
    Ok(Json(ingredients))
}

/// Revenue per day over the last 7 days
pub async fn get_weekly_revenue(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RevenueBucket>>> {
    let service = ReportingService::new(state.db);
    let buckets = service.weekly_revenue().await?;
    Ok(Json(buckets))
}

/// Revenue per month of the current year, in calendar order
pub async fn get_monthly_revenue(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RevenueBucket>>> {
    let service = ReportingService::new(state.db);
    let buckets = service.monthly_revenue().await?;
    Ok(Json(buckets))
}

/// Top 10 selling units by quantity sold
pub async fn get_best_sellers(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<BestSeller>>> {
    let service = ReportingService::new(state.db);
    let sellers = service.best_sellers(query.start_date, query.end_date).await?;
    Ok(Json(sellers))
}

/// Sales history as a CSV download
pub async fn export_sales_csv(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db);
    let csv = service.export_sales_csv(query.start_date, query.end_date).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales_report.csv\"",
            ),
        ],
        csv,
    ))
}

/// Stock mutation history as a CSV download
pub async fn export_stock_csv(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db);
    let csv = service.export_stock_csv(query.start_date, query.end_date).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"stock_report.csv\"",
            ),
        ],
        csv,
    ))
}
