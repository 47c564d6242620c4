//! HTTP handlers for ingredient catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::ingredient::{IngredientInput, IngredientService};
use crate::AppState;
use shared::models::Ingredient;

#[derive(Deserialize)]
pub struct IngredientQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub include_archived: bool,
}

/// List ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let service = IngredientService::new(state.db);
    let ingredients = service.list(query.search, query.include_archived).await?;
    Ok(Json(ingredients))
}

/// Get one ingredient by id
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Ingredient>> {
    let service = IngredientService::new(state.db);
    let ingredient = service.get(id).await?;
    Ok(Json(ingredient))
}

/// Register a new ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let service = IngredientService::new(state.db);
    let ingredient = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Update ingredient catalog fields
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<IngredientInput>,
) -> AppResult<Json<Ingredient>> {
    let service = IngredientService::new(state.db);
    let ingredient = service.update(id, input).await?;
    Ok(Json(ingredient))
}

/// Soft-archive an ingredient
pub async fn archive_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = IngredientService::new(state.db);
    service.archive(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore an archived ingredient
pub async fn restore_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = IngredientService::new(state.db);
    service.restore(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
