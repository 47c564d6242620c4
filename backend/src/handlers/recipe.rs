//! HTTP handlers for recipe endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::recipe::{RecipeEntryInput, RecipeLine, RecipeService};
use crate::AppState;
use shared::models::RecipeEntry;

#[derive(Deserialize)]
pub struct UpdateEntryInput {
    pub quantity_per_batch: Decimal,
}

/// Full recipe of a product
pub async fn list_recipe(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<RecipeLine>>> {
    let service = RecipeService::new(state.db);
    let lines = service.list(product_id).await?;
    Ok(Json(lines))
}

/// Add an ingredient requirement to a recipe
pub async fn add_recipe_entry(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<RecipeEntryInput>,
) -> AppResult<(StatusCode, Json<RecipeEntry>)> {
    let service = RecipeService::new(state.db);
    let entry = service.add_entry(product_id, input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Change the per-batch quantity of a recipe line
pub async fn update_recipe_entry(
    State(state): State<AppState>,
    Path((_product_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateEntryInput>,
) -> AppResult<Json<RecipeEntry>> {
    let service = RecipeService::new(state.db);
    let entry = service.update_entry(entry_id, input.quantity_per_batch).await?;
    Ok(Json(entry))
}

/// Remove a line from a recipe
pub async fn remove_recipe_entry(
    State(state): State<AppState>,
    Path((_product_id, entry_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = RecipeService::new(state.db);
    service.remove_entry(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
