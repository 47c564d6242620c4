//! Ingredient catalog service
//!
//! Stock quantity on the ingredient row is a cached projection of the
//! stock ledger. This service never mutates stock_qty directly; all
//! stock changes go through LedgerService.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Ingredient;
use shared::validation::is_critical_stock;

/// Service for ingredient catalog operations
#[derive(Clone)]
pub struct IngredientService {
    db: PgPool,
}

/// Create/update payload for ingredients
#[derive(Debug, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub unit: String,
    pub min_stock_alert: Option<Decimal>,
}

impl IngredientService {
    /// Create a new IngredientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List ingredients, optionally filtered by name (case-insensitive)
    /// and including archived rows
    pub async fn list(
        &self,
        search: Option<String>,
        include_archived: bool,
    ) -> AppResult<Vec<Ingredient>> {
        let pattern = search.map(|s| format!("%{}%", s));
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, unit, stock_qty, min_stock_alert, is_active, created_at
            FROM ingredients
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2 OR is_active IS DISTINCT FROM FALSE)
            ORDER BY name ASC
            "#,
        )
        .bind(pattern)
        .bind(include_archived)
        .fetch_all(&self.db)
        .await?;

        Ok(ingredients)
    }

    /// Fetch a single ingredient by id
    pub async fn get(&self, id: Uuid) -> AppResult<Ingredient> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, unit, stock_qty, min_stock_alert, is_active, created_at
            FROM ingredients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ingredient {} not found", id)))
    }

    /// Register a new ingredient with zero starting stock
    pub async fn create(&self, input: IngredientInput) -> AppResult<Ingredient> {
        self.validate(&input)?;

        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (name, unit, stock_qty, min_stock_alert)
            VALUES ($1, $2, 0, $3)
            RETURNING id, name, unit, stock_qty, min_stock_alert, is_active, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.unit)
        .bind(input.min_stock_alert)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateEntry(format!("Ingredient '{}' already exists", input.name))
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(ingredient)
    }

    /// Update catalog fields (never stock_qty)
    pub async fn update(&self, id: Uuid, input: IngredientInput) -> AppResult<Ingredient> {
        self.validate(&input)?;

        sqlx::query_as::<_, Ingredient>(
            r#"
            UPDATE ingredients
            SET name = $2, unit = $3, min_stock_alert = $4
            WHERE id = $1
            RETURNING id, name, unit, stock_qty, min_stock_alert, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.unit)
        .bind(input.min_stock_alert)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ingredient {} not found", id)))
    }

    /// Soft-archive an ingredient; history stays intact
    pub async fn archive(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE ingredients SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ingredient {} not found", id)));
        }
        Ok(())
    }

    /// Reactivate a previously archived ingredient
    pub async fn restore(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE ingredients SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ingredient {} not found", id)));
        }
        Ok(())
    }

    /// Active ingredients at or below their alert threshold
    pub async fn list_critical(&self) -> AppResult<Vec<Ingredient>> {
        let ingredients = self.list(None, false).await?;
        Ok(ingredients
            .into_iter()
            .filter(|i| is_critical_stock(i.stock_qty, i.min_stock_alert))
            .collect())
    }

    fn validate(&self, input: &IngredientInput) -> AppResult<()> {
        shared::validation::validate_name(&input.name).map_err(|m| AppError::Validation {
            field: "name".to_string(),
            message: m.to_string(),
            message_id: "Nama bahan tidak boleh kosong".to_string(),
        })?;

        if input.unit.trim().is_empty() {
            return Err(AppError::Validation {
                field: "unit".to_string(),
                message: "Unit must not be empty".to_string(),
                message_id: "Satuan tidak boleh kosong".to_string(),
            });
        }

        if let Some(alert) = input.min_stock_alert {
            if alert < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "min_stock_alert".to_string(),
                    message: "Alert threshold must not be negative".to_string(),
                    message_id: "Batas stok minimum tidak boleh negatif".to_string(),
                });
            }
        }
        Ok(())
    }
}
