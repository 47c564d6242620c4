//! Recipe (bill of materials) service
//!
//! A product's recipe is the set of per-batch ingredient requirements
//! the production processor scales by the batch count.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::RecipeEntry;
use shared::validation::validate_positive_qty;

/// Service for product recipes
#[derive(Clone)]
pub struct RecipeService {
    db: PgPool,
}

/// Payload for adding or updating a recipe line
#[derive(Debug, Deserialize)]
pub struct RecipeEntryInput {
    pub ingredient_id: Uuid,
    pub quantity_per_batch: Decimal,
}

/// Recipe line joined with ingredient details for display
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RecipeLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity_per_batch: Decimal,
}

impl RecipeService {
    /// Create a new RecipeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Full recipe of a product with ingredient names
    pub async fn list(&self, product_id: Uuid) -> AppResult<Vec<RecipeLine>> {
        let lines = sqlx::query_as::<_, RecipeLine>(
            r#"
            SELECT r.id, r.product_id, r.ingredient_id, i.name AS ingredient_name,
                   i.unit, r.quantity_per_batch
            FROM product_recipes r
            JOIN ingredients i ON i.id = r.ingredient_id
            WHERE r.product_id = $1
            ORDER BY i.name ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    /// Add an ingredient requirement to a product's recipe
    pub async fn add_entry(
        &self,
        product_id: Uuid,
        input: RecipeEntryInput,
    ) -> AppResult<RecipeEntry> {
        validate_positive_qty(input.quantity_per_batch).map_err(|m| AppError::Validation {
            field: "quantity_per_batch".to_string(),
            message: m.to_string(),
            message_id: "Jumlah per batch harus lebih dari 0".to_string(),
        })?;

        let entry = sqlx::query_as::<_, RecipeEntry>(
            r#"
            INSERT INTO product_recipes (product_id, ingredient_id, quantity_per_batch)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, ingredient_id, quantity_per_batch
            "#,
        )
        .bind(product_id)
        .bind(input.ingredient_id)
        .bind(input.quantity_per_batch)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateEntry(
                "Ingredient is already part of this recipe".to_string(),
            ),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound("Product or ingredient not found".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(entry)
    }

    /// Change the per-batch quantity of an existing recipe line
    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        quantity_per_batch: Decimal,
    ) -> AppResult<RecipeEntry> {
        validate_positive_qty(quantity_per_batch).map_err(|m| AppError::Validation {
            field: "quantity_per_batch".to_string(),
            message: m.to_string(),
            message_id: "Jumlah per batch harus lebih dari 0".to_string(),
        })?;

        sqlx::query_as::<_, RecipeEntry>(
            r#"
            UPDATE product_recipes
            SET quantity_per_batch = $2
            WHERE id = $1
            RETURNING id, product_id, ingredient_id, quantity_per_batch
            "#,
        )
        .bind(entry_id)
        .bind(quantity_per_batch)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe entry {} not found", entry_id)))
    }

    /// Remove a line from a recipe
    pub async fn remove_entry(&self, entry_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_recipes WHERE id = $1")
            .bind(entry_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Recipe entry {} not found",
                entry_id
            )));
        }
        Ok(())
    }
}
