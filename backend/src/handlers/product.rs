//! HTTP handlers for product catalog and selling unit endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product::{ProductDetail, ProductInput, ProductService, SellingUnitInput};
use crate::AppState;
use shared::models::{Product, SellingUnit};

#[derive(Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub include_archived: bool,
}

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list(query.include_archived).await?;
    Ok(Json(products))
}

/// Get a product with its selling units
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductDetail>> {
    let service = ProductService::new(state.db);
    let detail = service.get(id).await?;
    Ok(Json(detail))
}

/// Register a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product catalog fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Soft-archive a product
pub async fn archive_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.archive(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore an archived product
pub async fn restore_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.restore(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List selling units of a product
pub async fn list_selling_units(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<SellingUnit>>> {
    let service = ProductService::new(state.db);
    let units = service.list_selling_units(id).await?;
    Ok(Json(units))
}

/// Add a selling unit to a product
pub async fn add_selling_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SellingUnitInput>,
) -> AppResult<(StatusCode, Json<SellingUnit>)> {
    let service = ProductService::new(state.db);
    let unit = service.add_selling_unit(id, input).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// Update a selling unit
pub async fn update_selling_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Json(input): Json<SellingUnitInput>,
) -> AppResult<Json<SellingUnit>> {
    let service = ProductService::new(state.db);
    let unit = service.update_selling_unit(unit_id, input).await?;
    Ok(Json(unit))
}

/// Delete a selling unit
pub async fn delete_selling_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete_selling_unit(unit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
